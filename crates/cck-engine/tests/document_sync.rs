use cck_engine::{GeneratedRegion, merge, render};
use cck_types::{KeyFile, ProjectContext, ProjectType};

fn sample_context() -> ProjectContext {
    let mut ctx = ProjectContext::new("demo");
    ctx.project_type = ProjectType::Python;
    ctx.languages = vec!["Python".to_string()];
    ctx.entry_points = vec!["main.py".to_string()];
    ctx.test_patterns = vec!["test_*.py".to_string()];
    ctx.build_commands = vec!["pip install -e .".to_string(), "pytest".to_string()];
    ctx.structure = vec![
        "src/".to_string(),
        "  app.py".to_string(),
        "main.py".to_string(),
    ];
    ctx.key_files = vec![KeyFile {
        path: "pyproject.toml".to_string(),
        purpose: "Python project config".to_string(),
    }];
    ctx.conventions = vec!["snake_case file naming".to_string()];
    ctx
}

#[test]
fn test_full_context_rendering() {
    let region = render(&sample_context());

    insta::assert_snapshot!(region.as_str(), @r"
    <!--AUTO_START-->
    # demo

    ## Overview

    - **Type**: python
    - **Languages**: Python

    ## Entry Points

    - `main.py`

    ## Commands

    ```bash
    pip install -e .
    pytest
    ```

    ## Tests

    - `test_*.py`

    ## Structure

    ```
    src/
      app.py
    main.py
    ```

    ## Key Files

    - `pyproject.toml`: Python project config

    ## Conventions

    - snake_case file naming
    <!--AUTO_END-->
    ");
}

#[test]
fn test_header_and_footer_survive_regeneration() {
    let doc = "Header\n<!--AUTO_START-->\nold\n<!--AUTO_END-->\nFooter";
    let merged = merge(doc, &render(&sample_context()));

    assert!(merged.starts_with("Header\n\n<!--AUTO_START-->\n# demo"));
    assert!(merged.ends_with("<!--AUTO_END-->\n\nFooter"));
    assert!(!merged.contains("\nold\n"));
}

#[test]
fn test_merge_is_idempotent_across_document_shapes() {
    let region = render(&sample_context());
    let documents = [
        "",
        "   \n",
        "# Notes\n\nkeep me\n",
        "Top\n<!--AUTO_START-->\nstale\n<!--AUTO_END-->\nBottom\n",
        "<!--AUTO_START-->x<!--AUTO_END-->",
        "  leading spaces\n\n\n<!--AUTO_START--><!--AUTO_END-->\n\n\ntrailing  ",
    ];

    for doc in documents {
        let once = merge(doc, &region);
        let twice = merge(&once, &region);
        assert_eq!(once, twice, "merge not idempotent for {:?}", doc);
    }
}

#[test]
fn test_legacy_document_gains_region_once() {
    let region = GeneratedRegion::new("generated");
    let doc = "# Hand written\n\nNothing automatic here.\n";

    let once = merge(doc, &region);
    assert_eq!(
        once,
        "# Hand written\n\nNothing automatic here.\n\n---\n\n<!--AUTO_START-->\ngenerated\n<!--AUTO_END-->"
    );

    let twice = merge(&once, &region);
    assert_eq!(twice, once);
}

#[test]
fn test_leading_and_trailing_text_is_preserved_verbatim() {
    let leading = "# Title\n\nSome *markdown* with  double  spaces.";
    let trailing = "## Manual notes\n\n- one\n- two";
    let doc = format!(
        "{}\n<!--AUTO_START-->\nold body\n<!--AUTO_END-->\n{}",
        leading, trailing
    );

    let merged = merge(&doc, &GeneratedRegion::new("new body"));

    assert_eq!(
        merged,
        format!(
            "{}\n\n<!--AUTO_START-->\nnew body\n<!--AUTO_END-->\n\n{}",
            leading, trailing
        )
    );
}
