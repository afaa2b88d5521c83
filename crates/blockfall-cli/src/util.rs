use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

/// Writes `value` as pretty-printed JSON to `path`, or to stdout if `path` is `None`.
pub fn write_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_pretty(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => write_pretty(io::stdout().lock(), value).context("Failed to write JSON to stdout"),
    }
}

fn write_pretty<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads a JSON document from `path`. `kind` names the document in error messages.
pub fn load_json<T>(kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file =
        File::open(path).with_context(|| format!("Failed to open {kind} {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid {kind} JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use blockfall_engine::GameState;

    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("blockfall_{name}_{nanos}.json"))
    }

    #[test]
    fn test_write_json_to_file_then_load() {
        let path = temp_file("state");
        let state = GameState::initial();
        write_json(&state, Some(&path)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"), "{text}");
        let loaded: GameState = load_json("state", &path).unwrap();
        assert_eq!(loaded, state);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json_into_missing_directory_fails() {
        let path = temp_file("no_such_dir").join("state.json");
        let err = write_json(&GameState::initial(), Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create"), "{err}");
    }

    #[test]
    fn test_load_missing_file_names_kind_and_path() {
        let path = temp_file("missing");
        let err = load_json::<GameState>("recording", &path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("recording"), "{message}");
        assert!(message.contains(&path.display().to_string()), "{message}");
    }

    #[test]
    fn test_load_malformed_file_reports_parse_error() {
        let path = temp_file("malformed");
        fs::write(&path, "{ not json").unwrap();
        let err = load_json::<GameState>("recording", &path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid recording JSON"), "{err}");
        fs::remove_file(&path).unwrap();
    }
}
