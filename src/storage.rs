use crate::planning::{Mutation, MutationListener, Planning};
use crate::roster::RosterStore;
use crate::schedule::ScheduleStore;
use anyhow::Context;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::NamedTempFile;

/// Clé logique de la collection du personnel.
pub const STAFF_KEY: &str = "staff";
/// Clé logique de la collection des affectations.
pub const ASSIGNMENTS_KEY: &str = "assignments";

/// Stockage clé → blob opaque.
pub trait BlobStore {
    /// `None` si la clé n'a jamais été écrite.
    fn load(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;
    /// Sauvegarde de manière atomique.
    fn save(&self, key: &str, blob: &[u8]) -> anyhow::Result<()>;
}

/// Un fichier `<key>.json` par clé dans un répertoire.
#[derive(Debug, Clone)]
pub struct DirBlobStore {
    dir: PathBuf,
}

impl DirBlobStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for DirBlobStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn save(&self, key: &str, blob: &[u8]) -> anyhow::Result<()> {
        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir).with_context(|| "creating temp file")?;
        tmp.write_all(blob)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .with_context(|| format!("atomic rename to {}", path.display()))?;
        Ok(())
    }
}

/// Stockage en mémoire, partageable par clonage (tests, hôtes embarqués).
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.borrow().contains_key(key)
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &[u8]) -> anyhow::Result<()> {
        self.blobs.borrow_mut().insert(key.to_owned(), blob.to_vec());
        Ok(())
    }
}

pub fn save_roster<S: BlobStore + ?Sized>(store: &S, roster: &RosterStore) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(roster)?;
    store.save(STAFF_KEY, &json)
}

pub fn save_schedule<S: BlobStore + ?Sized>(store: &S, schedule: &ScheduleStore) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(schedule)?;
    store.save(ASSIGNMENTS_KEY, &json)
}

pub fn load_roster<S: BlobStore + ?Sized>(store: &S) -> anyhow::Result<RosterStore> {
    match store.load(STAFF_KEY)? {
        Some(data) => serde_json::from_slice(&data).with_context(|| "parsing staff collection"),
        None => Ok(RosterStore::default()),
    }
}

pub fn load_schedule<S: BlobStore + ?Sized>(store: &S) -> anyhow::Result<ScheduleStore> {
    match store.load(ASSIGNMENTS_KEY)? {
        Some(data) => {
            serde_json::from_slice(&data).with_context(|| "parsing assignments collection")
        }
        None => Ok(ScheduleStore::default()),
    }
}

/// Recharge un planning complet ; les clés absentes donnent des collections vides.
pub fn load_planning<S: BlobStore + ?Sized>(store: &S) -> anyhow::Result<Planning> {
    let roster = load_roster(store)?;
    let schedule = load_schedule(store)?;
    Ok(Planning::from_parts(roster, schedule))
}

/// Listener qui réécrit la ou les collections touchées après chaque mutation.
#[derive(Debug, Clone)]
pub struct PersistListener<S> {
    store: S,
}

impl<S: BlobStore> PersistListener<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: BlobStore> MutationListener for PersistListener<S> {
    fn on_mutation(
        &mut self,
        event: &Mutation,
        roster: &RosterStore,
        schedule: &ScheduleStore,
    ) -> anyhow::Result<()> {
        if event.touches_roster() {
            save_roster(&self.store, roster)?;
        }
        if event.touches_schedule() {
            save_schedule(&self.store, schedule)?;
        }
        Ok(())
    }
}
