use crate::{ActorInput, Result, DEFAULT_DATASET_ID, DEFAULT_INPUT_KEY, DEFAULT_STORE_ID};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Storage directory layout used when running outside the platform
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
    store_id: String,
    dataset_id: String,
    input_key: String,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            store_id: DEFAULT_STORE_ID.to_owned(),
            dataset_id: DEFAULT_DATASET_ID.to_owned(),
            input_key: DEFAULT_INPUT_KEY.to_owned(),
        }
    }

    pub fn with_ids(mut self, store_id: String, dataset_id: String, input_key: String) -> Self {
        self.store_id = store_id;
        self.dataset_id = dataset_id;
        self.input_key = input_key;
        self
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir
            .join("key_value_stores")
            .join(&self.store_id)
            .join(format!("{}.json", self.input_key))
    }

    pub fn dataset_dir(&self) -> PathBuf {
        self.dir.join("datasets").join(&self.dataset_id)
    }

    pub(crate) async fn get_input(&self) -> Result<Option<ActorInput>> {
        let path = self.input_path();
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no input file at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    /// One file per item, numbering continues after the highest stored item
    pub(crate) async fn push_data<T: Serialize>(&self, items: &[T]) -> Result<()> {
        let dataset_dir = self.dataset_dir();
        tokio::fs::create_dir_all(&dataset_dir).await?;
        let mut next = last_item_index(&dataset_dir).await? + 1;
        for item in items {
            let path = dataset_dir.join(format!("{:09}.json", next));
            tokio::fs::write(&path, serde_json::to_vec_pretty(item)?).await?;
            next += 1;
        }
        log::debug!(
            "wrote {} items to {}",
            items.len(),
            dataset_dir.display()
        );
        Ok(())
    }
}

/// Index of an item file, `None` for anything not named `NNNNNNNNN.json`
fn item_index(path: &Path) -> Option<usize> {
    if path.extension()? != "json" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.len() != 9 || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

async fn last_item_index(dataset_dir: &Path) -> Result<usize> {
    let mut entries = tokio::fs::read_dir(dataset_dir).await?;
    let mut last = 0;
    while let Some(entry) = entries.next_entry().await? {
        if let Some(index) = item_index(&entry.path()) {
            last = last.max(index);
        }
    }
    Ok(last)
}
