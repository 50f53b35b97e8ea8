use std::io::BufRead;
use std::io::Write;
use std::path::Path;

/// bulk JSON-Lines persistence for record batches. the core mandates no
/// particular format; this is the reference store the pipeline binary uses
/// for hand records in and decision points out.
pub fn read_all<T>(path: &Path) -> crate::Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        items.push(serde_json::from_str(&line)?);
    }
    log::debug!("{:<32}{:<32}", "loaded records", items.len());
    Ok(items)
}

pub fn write_all<T>(path: &Path, items: &[T]) -> crate::Result<()>
where
    T: serde::Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    for item in items {
        serde_json::to_writer(&mut writer, item)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    log::debug!("{:<32}{:<32}", "wrote records", items.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hands::record::HandRecord;

    #[test]
    fn roundtrip() {
        let json = r#"{
            "hand_id": "h1", "source": "txt_pokerstars",
            "hero": "hero", "villain": "fish",
            "sb": 10.0, "bb": 20.0,
            "players": [
                {"name": "hero", "seat": 0, "stack": 500.0, "is_button": true},
                {"name": "fish", "seat": 1, "stack": 480.0}
            ],
            "actions": [{"player": "fish", "kind": "check"}]
        }"#;
        let record: HandRecord = serde_json::from_str(json).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hands.jsonl");
        write_all(&path, std::slice::from_ref(&record)).unwrap();
        let back: Vec<HandRecord> = read_all(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].hand_id, "h1");
        assert_eq!(back[0].source, Some(crate::hands::HandFormat::TxtPokerstars));
        assert_eq!(back[0].players[0].is_button, true);
        assert_eq!(back[0].board.len(), 0);
    }
}
