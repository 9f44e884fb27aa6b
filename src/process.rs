use crate::converter::Converter;
use crate::describe::{parse_table, read_document};
use crate::output::{render, write_atomic, Format};
use crate::{Error, Result};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const OUTPUT_SUFFIX: &str = "-cfn";

/// Runs conversions from files on disk to template files on disk.
#[derive(Debug, Default)]
pub struct Processor {
    converter: Converter,
    format: Format,
}

/// Outcome of a directory run.
#[derive(Debug, Default)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, Error)>,
}

impl Summary {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl Processor {
    pub fn new(converter: Converter, format: Format) -> Self {
        Self { converter, format }
    }

    /// Converts one describe-table file. Without `output` the template lands
    /// next to the input as `<TableName>-cfn.<ext>`.
    pub fn process_file<P: AsRef<Path>>(
        &self,
        input: P,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let input = input.as_ref();
        let document = read_document(input)?;
        let table = parse_table(&document)?;
        let template = self.converter.convert(&table)?;
        let text = render(&template, self.format)?;

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => input.with_file_name(self.output_name(&table.table_name)),
        };
        write_atomic(&output, &text)?;

        info!("{} -> {}", input.display(), output.display());
        Ok(output)
    }

    /// Converts every `*.json` file directly inside `dir`. Failing files are
    /// skipped and reported in the summary.
    pub fn process_dir<P: AsRef<Path>>(
        &self,
        dir: P,
        out_dir: Option<&Path>,
    ) -> Result<Summary> {
        let dir = dir.as_ref();
        let out_dir = out_dir.unwrap_or(dir);
        fs::create_dir_all(out_dir).map_err(|err| Error::io(out_dir, err))?;

        let mut summary = Summary::default();
        for input in input_files(dir)? {
            let stem = input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let target = out_dir.join(self.output_name(&stem));

            match self.process_file(&input, Some(&target)) {
                Ok(path) => summary.written.push(path),
                Err(err) => {
                    warn!("Skipped {}: {err}", input.display());
                    summary.skipped.push((input, err));
                }
            }
        }

        info!(
            "Converted {} file(s), skipped {}",
            summary.written.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    fn output_name(&self, stem: &str) -> String {
        format!("{stem}{OUTPUT_SUFFIX}.{}", self.format.extension())
    }
}

fn input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|err| Error::io(dir, err))?;

    let mut files = vec![];
    for entry in entries {
        let path = entry.map_err(|err| Error::io(dir, err))?.path();
        if path.is_file() && is_json(&path) && !is_generated(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PEOPLE: &str = "src/describe/test/people.json";
    const ORDERS: &str = "src/converter/test/orders.json";

    fn workspace(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, source) in files {
            fs::copy(source, dir.path().join(name)).unwrap();
        }
        dir
    }

    #[test]
    fn it_writes_template_next_to_the_input_by_default() {
        let dir = workspace(&[("describe.json", PEOPLE)]);
        let processor = Processor::default();

        let output = processor
            .process_file(dir.path().join("describe.json"), None)
            .unwrap();

        assert_eq!(output, dir.path().join("People-cfn.json"));
        let template: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            template["Resources"]["People"]["Properties"]["TableName"],
            "People"
        );
    }

    #[test]
    fn it_writes_template_to_the_given_output() {
        let dir = workspace(&[("describe.json", PEOPLE)]);
        let processor = Processor::new(Converter::default(), Format::Yaml);
        let target = dir.path().join("people.yaml");

        let output = processor
            .process_file(dir.path().join("describe.json"), Some(&target))
            .unwrap();

        assert_eq!(output, target);
        let text = fs::read_to_string(&target).unwrap();
        assert!(text.contains("Type: AWS::DynamoDB::Table"));
    }

    #[test]
    fn it_writes_nothing_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, r#"{"Table": {"TableName": "People"}}"#).unwrap();
        let target = dir.path().join("broken-cfn.json");

        let result = Processor::default().process_file(&input, Some(&target));

        assert!(result.unwrap_err().is_malformed_input());
        assert!(!target.exists());
    }

    #[test]
    fn it_rejects_table_names_that_leave_the_input_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        fs::create_dir(&input_dir).unwrap();
        let input = input_dir.join("describe.json");
        let document = serde_json::json!({
            "Table": {
                "TableName": "../escaped",
                "AttributeDefinitions": [{ "AttributeName": "Id", "AttributeType": "S" }],
                "KeySchema": [{ "AttributeName": "Id", "KeyType": "HASH" }]
            }
        });
        fs::write(&input, document.to_string()).unwrap();

        let result = Processor::default().process_file(&input, None);

        assert!(result.unwrap_err().is_malformed_input());
        assert!(!dir.path().join("escaped-cfn.json").exists());
        assert_eq!(fs::read_dir(&input_dir).unwrap().count(), 1);
    }

    #[test]
    fn it_converts_every_json_file_in_a_directory() {
        let dir = workspace(&[
            ("people.json", PEOPLE),
            ("orders.JSON", ORDERS),
            ("notes.txt", PEOPLE),
        ]);
        fs::write(dir.path().join("broken.json"), "not json").unwrap();
        let out_dir = dir.path().join("templates");

        let summary = Processor::default()
            .process_dir(dir.path(), Some(&out_dir))
            .unwrap();

        assert_eq!(
            summary.written,
            vec![out_dir.join("orders-cfn.json"), out_dir.join("people-cfn.json")]
        );
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].0, dir.path().join("broken.json"));
        assert!(!summary.is_complete());
    }

    #[test]
    fn it_does_not_reconvert_generated_templates() {
        let dir = workspace(&[("people.json", PEOPLE)]);
        let processor = Processor::default();

        let first = processor.process_dir(dir.path(), None).unwrap();
        let second = processor.process_dir(dir.path(), None).unwrap();

        assert_eq!(first.written, vec![dir.path().join("people-cfn.json")]);
        assert_eq!(second.written, first.written);
        assert!(second.is_complete());
    }

    #[test]
    fn it_returns_io_error_if_the_directory_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let out_dir = dir.path().join("out");

        let result = Processor::default().process_dir(&missing, Some(&out_dir));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
