//! Fix command - rewrite old-site links into internal references.

use anyhow::Result;

use crate::cli::FixArgs;
use crate::config::RelinkConfig;
use crate::core::{build_url_index, load_document, rewrite_links, write_document};
use crate::log;
use crate::utils::plural_count;

/// Run the fix command
pub fn run_fix(config: &RelinkConfig, args: &FixArgs) -> Result<()> {
    let input = config.input_path(args.input.as_deref());
    let output = config.output_path(args.output.as_deref(), &input);

    log!("load"; "reading {}", input.display());
    let mut doc = load_document(&input)?;

    let index = build_url_index(&doc);
    log!("index"; "{} with an old-site url", plural_count(index.len(), "article"));

    let fixed = rewrite_links(&mut doc, &index);
    log!("fix"; "{} rewritten", plural_count(fixed, "link"));

    write_document(&output, &doc)?;
    log!("fix"; "saved {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DocumentError;
    use serde_json::Value;
    use std::fs;
    use std::path::Path;

    fn run_pipeline(input: &Path, output: &Path) -> Result<usize, DocumentError> {
        let mut doc = load_document(input)?;
        let index = build_url_index(&doc);
        let fixed = rewrite_links(&mut doc, &index);
        write_document(output, &doc)?;
        Ok(fixed)
    }

    #[test]
    fn test_end_to_end_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(
            &path,
            r#"{"a":[{"id":1,"url":"http://x.com/p/","content":"<a href=\"http://x.com/p\">x</a>"}]}"#,
        )
        .unwrap();

        let fixed = run_pipeline(&path, &path).unwrap();
        assert_eq!(fixed, 1);

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(
            raw,
            r##"{"a":[{"id":1,"url":"http://x.com/p/","content":"<a href=\"#internal-1\" data-internal=\"true\">x</a>"}]}"##
        );
    }

    #[test]
    fn test_end_to_end_no_match_leaves_document_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("kb.json");
        let output = dir.path().join("out.json");
        let raw =
            r#"{"a":[{"id":1,"url":"http://x.com/p/","content":"<a href=\"http://x.com/q\">x</a>"}]}"#;
        fs::write(&input, raw).unwrap();

        let fixed = run_pipeline(&input, &output).unwrap();
        assert_eq!(fixed, 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), raw);
    }

    #[test]
    fn test_structure_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(
            &path,
            r#"{"meta":{"version":3,"exported":"2024-05-01"},"categories":[{"title":"Оплата","articles":[{"id":"pay-1","url":"https://old.site/pay/","content":"<p>см. <a href='https://old.site/delivery'>доставку</a></p>","tags":["faq",null,true]},{"id":"del-1","url":"https://old.site/delivery/","content":"plain"}]}]}"#,
        )
        .unwrap();

        let before: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let fixed = run_pipeline(&path, &path).unwrap();
        assert_eq!(fixed, 1);

        let after: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        // Everything except the rewritten content is unchanged, in place
        assert_eq!(after["meta"], before["meta"]);
        assert_eq!(
            after["categories"][0]["title"],
            before["categories"][0]["title"]
        );
        assert_eq!(
            after["categories"][0]["articles"][1],
            before["categories"][0]["articles"][1]
        );
        assert_eq!(
            after["categories"][0]["articles"][0]["content"],
            r##"<p>см. <a href="#internal-del-1" data-internal="true">доставку</a></p>"##
        );
    }

    #[test]
    fn test_missing_input_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.json");
        let output = dir.path().join("out.json");

        let err = run_pipeline(&input, &output).unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
        assert!(!output.exists());
    }
}
