use crate::index::Metadata;
use crate::index::Partition;
use crate::index::Structure;
use crate::index::exact::Exact;
use crate::index::ivf::Ivf;
use crate::index::nsw::Nsw;
use crate::Error;
use crate::Result;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use byteorder::BE;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

const IDX_MAGIC: &[u8; 4] = b"SSIX";
const IDS_MAGIC: &[u8; 4] = b"SSID";
const VERSION: u8 = 1;

/// persistence for partition snapshots. each key owns three sibling
/// artifacts under one directory: `{key}.idx` (big-endian structure
/// blob), `{key}.ids` (length-prefixed decision ids), `{key}.json`
/// (metadata). every write lands in a `.tmp` sibling first and is
/// renamed into place, so readers only ever observe whole files.
#[derive(Debug, Clone)]
pub struct Disk {
    dir: PathBuf,
}

impl Disk {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
    fn path(&self, key: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, ext))
    }

    /// keys with a complete artifact triple on disk, sorted. a directory
    /// that was never created holds no partitions, which is not an error.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().map(|e| e == "idx").unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if self.exists(stem) {
                        keys.push(stem.to_string());
                    }
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    pub fn exists(&self, key: &str) -> bool {
        ["idx", "ids", "json"]
            .iter()
            .all(|ext| self.path(key, ext).is_file())
    }

    pub fn save(&self, key: &str, partition: &Partition) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        self.commit(key, "idx", |w| encode_structure(w, &partition.structure))?;
        self.commit(key, "ids", |w| encode_ids(w, &partition.ids))?;
        self.commit(key, "json", |w| {
            serde_json::to_writer_pretty(w, &partition.metadata).map_err(Error::from)
        })?;
        log::debug!("{:<32}{:<32}", "saved partition", key);
        Ok(())
    }

    pub fn load(&self, key: &str) -> Result<Partition> {
        if !self.exists(key) {
            return Err(Error::PartitionNotFound(key.to_string()));
        }
        let structure = decode_structure(&mut self.open(key, "idx")?)?;
        let ids = decode_ids(&mut self.open(key, "ids")?)?;
        let metadata: Metadata = serde_json::from_reader(self.open(key, "json")?)?;
        Partition::new(metadata, ids, structure)
    }

    pub fn metadata(&self, key: &str) -> Result<Metadata> {
        if !self.exists(key) {
            return Err(Error::PartitionNotFound(key.to_string()));
        }
        Ok(serde_json::from_reader(self.open(key, "json")?)?)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        for ext in ["idx", "ids", "json"] {
            let path = self.path(key, ext);
            if path.is_file() {
                std::fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn open(&self, key: &str, ext: &str) -> Result<BufReader<File>> {
        Ok(BufReader::new(File::open(self.path(key, ext))?))
    }

    /// write through a tmp sibling, then rename into place
    fn commit(
        &self,
        key: &str,
        ext: &str,
        write: impl FnOnce(&mut BufWriter<File>) -> Result<()>,
    ) -> Result<()> {
        let target = self.path(key, ext);
        let staging = self.path(key, &format!("{}.tmp", ext));
        let mut writer = BufWriter::new(File::create(&staging)?);
        write(&mut writer)?;
        writer.flush()?;
        drop(writer);
        std::fs::rename(&staging, &target)?;
        Ok(())
    }
}

fn encode_ids(w: &mut impl Write, ids: &[String]) -> Result<()> {
    w.write_all(IDS_MAGIC)?;
    w.write_u8(VERSION)?;
    w.write_u32::<BE>(ids.len() as u32)?;
    for id in ids {
        w.write_u32::<BE>(id.len() as u32)?;
        w.write_all(id.as_bytes())?;
    }
    Ok(())
}

fn decode_ids(r: &mut impl Read) -> Result<Vec<String>> {
    expect_magic(r, IDS_MAGIC)?;
    let count = r.read_u32::<BE>()? as usize;
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let len = r.read_u32::<BE>()? as usize;
        let mut buf = vec![0u8; len];
        r.read_exact(&mut buf)?;
        ids.push(
            String::from_utf8(buf)
                .map_err(|_| Error::Artifact("non-utf8 decision id".to_string()))?,
        );
    }
    Ok(ids)
}

fn encode_structure(w: &mut impl Write, structure: &Structure) -> Result<()> {
    w.write_all(IDX_MAGIC)?;
    w.write_u8(VERSION)?;
    w.write_u8(structure.kind().tag())?;
    match structure {
        Structure::Exact(e) => {
            encode_rows(w, e.dimension, &e.data)?;
        }
        Structure::Nsw(n) => {
            encode_rows(w, n.dimension, &n.data)?;
            w.write_u32::<BE>(n.degree as u32)?;
            w.write_u32::<BE>(n.breadth as u32)?;
            for peers in &n.links {
                encode_list(w, peers)?;
            }
        }
        Structure::Ivf(i) => {
            encode_rows(w, i.dimension, &i.data)?;
            w.write_u32::<BE>(i.probes as u32)?;
            w.write_u32::<BE>(i.centroids.len() as u32)?;
            for centroid in &i.centroids {
                for x in centroid {
                    w.write_f32::<BE>(*x)?;
                }
            }
            for members in &i.lists {
                encode_list(w, members)?;
            }
        }
    }
    Ok(())
}

fn decode_structure(r: &mut impl Read) -> Result<Structure> {
    expect_magic(r, IDX_MAGIC)?;
    let tag = r.read_u8()?;
    let (dimension, count, data) = decode_rows(r)?;
    match tag {
        0 => Ok(Structure::Exact(Exact { dimension, data })),
        1 => {
            let degree = r.read_u32::<BE>()? as usize;
            let breadth = r.read_u32::<BE>()? as usize;
            let links = (0..count).map(|_| decode_list(r)).collect::<Result<_>>()?;
            Ok(Structure::Nsw(Nsw {
                dimension,
                degree,
                breadth,
                data,
                links,
            }))
        }
        2 => {
            let probes = r.read_u32::<BE>()? as usize;
            let k = r.read_u32::<BE>()? as usize;
            let mut centroids = Vec::with_capacity(k);
            for _ in 0..k {
                let mut centroid = vec![0f32; dimension];
                for x in centroid.iter_mut() {
                    *x = r.read_f32::<BE>()?;
                }
                centroids.push(centroid);
            }
            let lists = (0..k).map(|_| decode_list(r)).collect::<Result<_>>()?;
            Ok(Structure::Ivf(Ivf {
                dimension,
                probes,
                data,
                centroids,
                lists,
            }))
        }
        n => Err(Error::Artifact(format!("unknown index tag {}", n))),
    }
}

fn encode_rows(w: &mut impl Write, dimension: usize, data: &[f32]) -> Result<()> {
    w.write_u32::<BE>(dimension as u32)?;
    w.write_u32::<BE>((data.len() / dimension.max(1)) as u32)?;
    for x in data {
        w.write_f32::<BE>(*x)?;
    }
    Ok(())
}

fn decode_rows(r: &mut impl Read) -> Result<(usize, usize, Vec<f32>)> {
    let dimension = r.read_u32::<BE>()? as usize;
    let count = r.read_u32::<BE>()? as usize;
    let mut data = vec![0f32; dimension * count];
    for x in data.iter_mut() {
        *x = r.read_f32::<BE>()?;
    }
    Ok((dimension, count, data))
}

fn encode_list(w: &mut impl Write, list: &[u32]) -> Result<()> {
    w.write_u32::<BE>(list.len() as u32)?;
    for i in list {
        w.write_u32::<BE>(*i)?;
    }
    Ok(())
}

fn decode_list(r: &mut impl Read) -> Result<Vec<u32>> {
    let len = r.read_u32::<BE>()? as usize;
    (0..len).map(|_| Ok(r.read_u32::<BE>()?)).collect()
}

fn expect_magic(r: &mut impl Read, magic: &[u8; 4]) -> Result<()> {
    let mut head = [0u8; 4];
    r.read_exact(&mut head)?;
    if &head != magic {
        return Err(Error::Artifact(format!("bad magic {:?}", head)));
    }
    let version = r.read_u8()?;
    if version != VERSION {
        return Err(Error::Artifact(format!("unsupported version {}", version)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexKind;

    fn partition(kind: IndexKind) -> Partition {
        let vectors = (0..24)
            .map(|i| vec![i as f32, (i * i % 7) as f32])
            .collect::<Vec<_>>();
        let ids = (0..24).map(|i| format!("h{}_0", i)).collect::<Vec<_>>();
        let metadata = Metadata::new("fish", 2, kind, &vectors);
        let structure = Structure::build(&kind, 2, &vectors).unwrap();
        Partition::new(metadata, ids, structure).unwrap()
    }

    #[test]
    fn round_trips_every_kind() {
        let dir = tempfile::tempdir().unwrap();
        let disk = Disk::new(dir.path());
        for kind in [
            IndexKind::Exact,
            IndexKind::Nsw {
                degree: 4,
                breadth: 16,
            },
            IndexKind::Ivf {
                centroids: Some(4),
                probes: 2,
            },
        ] {
            let before = partition(kind);
            disk.save("fish", &before).unwrap();
            let after = disk.load("fish").unwrap();
            assert_eq!(after, before);
        }
    }

    #[test]
    fn missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let disk = Disk::new(dir.path());
        disk.save("fish", &partition(IndexKind::Exact)).unwrap();
        std::fs::remove_file(dir.path().join("fish.ids")).unwrap();
        assert!(matches!(
            disk.load("fish").unwrap_err(),
            Error::PartitionNotFound(_)
        ));
    }

    #[test]
    fn keys_lists_complete_triples() {
        let dir = tempfile::tempdir().unwrap();
        let disk = Disk::new(dir.path());
        disk.save("b", &partition(IndexKind::Exact)).unwrap();
        disk.save("a", &partition(IndexKind::Exact)).unwrap();
        assert_eq!(disk.keys().unwrap(), vec!["a", "b"]);
        disk.remove("a").unwrap();
        assert_eq!(disk.keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn garbage_blob_is_an_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        let disk = Disk::new(dir.path());
        disk.save("fish", &partition(IndexKind::Exact)).unwrap();
        std::fs::write(dir.path().join("fish.idx"), b"XXXX\x01garbage").unwrap();
        assert!(matches!(
            disk.load("fish").unwrap_err(),
            Error::Artifact(_)
        ));
    }
}
