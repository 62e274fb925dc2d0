//! Renders Script Includes as annotated `.js` files.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SnScriptError};
use crate::fs::FileSystem;
use crate::record::ScriptInclude;

/// Record type label written into every header
pub const RECORD_TYPE: &str = "Script Include";

/// Extension of emitted files
pub const OUTPUT_EXTENSION: &str = "js";

/// Render the output file: header block, blank line, trimmed body, newline
pub fn render(record: &ScriptInclude, app_name: &str, source_name: &str) -> String {
    format!(
        "/**\n * App: {}\n * Type: {}\n * Name: {}\n * API Name: {}\n * Active: {}\n * Source: {}\n */\n\n{}\n",
        app_name,
        RECORD_TYPE,
        record.name,
        record.api_name,
        record.active,
        source_name,
        record.script.trim()
    )
}

/// Resolve `<output_dir>/<name>.js`.
///
/// The name must be a single plain path component so a record can never
/// write outside `output_dir`.
pub fn output_path(output_dir: &Path, name: &str) -> Result<PathBuf> {
    let file_name = format!("{}.{}", name, OUTPUT_EXTENSION);

    let is_plain = !name.contains(['/', '\\', '\0'])
        && matches!(
            Path::new(name).components().collect::<Vec<_>>().as_slice(),
            [Component::Normal(_)]
        );
    if !is_plain {
        return Err(SnScriptError::UnsafeRecordName(name.to_string()));
    }

    Ok(output_dir.join(file_name))
}

/// Write one record to `output_dir`, replacing any existing file.
/// Returns the path written.
pub fn emit<FS: FileSystem>(
    fs: &FS,
    output_dir: &Path,
    record: &ScriptInclude,
    app_name: &str,
    source_name: &str,
) -> Result<PathBuf> {
    let path = output_path(output_dir, &record.name)?;
    let content = render(record, app_name, source_name);

    fs.write_file(&path, &content)
        .map_err(|source| SnScriptError::FileWrite {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockFileSystem;

    fn record(name: &str, script: &str) -> ScriptInclude {
        ScriptInclude {
            name: name.to_string(),
            script: script.to_string(),
            api_name: "x_app.MyUtil".to_string(),
            active: "true".to_string(),
        }
    }

    #[test]
    fn test_render_exact_layout() {
        let rendered = render(
            &record("MyUtil", "  var x = 1;  "),
            "my_app",
            "sys_script_include_1.xml",
        );
        assert_eq!(
            rendered,
            "/**\n\
             \x20* App: my_app\n\
             \x20* Type: Script Include\n\
             \x20* Name: MyUtil\n\
             \x20* API Name: x_app.MyUtil\n\
             \x20* Active: true\n\
             \x20* Source: sys_script_include_1.xml\n\
             \x20*/\n\
             \n\
             var x = 1;\n"
        );
    }

    #[test]
    fn test_render_trims_multiline_body() {
        let rendered = render(&record("A", "\n\n  line1\n  line2\n\n"), "app", "s.xml");
        assert!(rendered.ends_with(" */\n\nline1\n  line2\n"));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/app/script_includes"), "MyUtil").unwrap(),
            PathBuf::from("/app/script_includes/MyUtil.js")
        );
        assert_eq!(
            output_path(Path::new("out"), "My.Util").unwrap(),
            PathBuf::from("out/My.Util.js")
        );
    }

    #[test]
    fn test_output_path_rejects_traversal() {
        for name in ["../../etc/passwd", "..", ".", "a/b", "a\\b", "/abs", "nul\0"] {
            let err = output_path(Path::new("out"), name).unwrap_err();
            assert!(
                matches!(err, SnScriptError::UnsafeRecordName(_)),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn test_emit_overwrites_existing() {
        let fs = MockFileSystem::new()
            .with_dir("/out")
            .with_file("/out/MyUtil.js", "stale");

        let path = emit(&fs, Path::new("/out"), &record("MyUtil", "new();"), "app", "s.xml").unwrap();

        assert_eq!(path, PathBuf::from("/out/MyUtil.js"));
        let content = fs.get_content("/out/MyUtil.js").unwrap();
        assert!(content.ends_with("\n\nnew();\n"));
    }

    #[test]
    fn test_emit_write_failure() {
        let fs = MockFileSystem::new()
            .with_dir("/out")
            .with_failing_write("/out/MyUtil.js");

        let err = emit(&fs, Path::new("/out"), &record("MyUtil", "x"), "app", "s.xml").unwrap_err();
        assert!(matches!(err, SnScriptError::FileWrite { .. }));
    }
}
