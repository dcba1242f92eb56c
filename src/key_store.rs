// src/key_store.rs
//! On-disk key artifacts: encrypted private key PEM, public key PEM and
//! the RSA-wrapped content key
//!
//! First-time generation runs under an exclusive lock file next to the
//! private key (`<private_key>.lock`, created with `create_new`). A second
//! bootstrapper that finds the lock taken gets a `Storage` error with
//! `AlreadyExists`; one that gets the lock after the winner finished sees
//! the complete set and reports `Existing`. Artifacts missing when
//! generation started are persisted without clobbering. A lock file left
//! behind by a crashed bootstrap has to be removed by hand.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rsa::{RsaPrivateKey, RsaPublicKey};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::aliases::{ContentKey32, KeyPassphrase};
use crate::config::KeyPaths;
use crate::core::{
    decode_private_key, decode_public_key, encode_private_key, encode_public_key,
    public_key_fingerprint, unwrap_content_key, wrap_content_key, KeyMaterialGenerator,
};
use crate::enums::InitOutcome;
use crate::error::{CoreError, Result};

pub struct KeyStore {
    paths: KeyPaths,
    passphrase: KeyPassphrase,
    generator: KeyMaterialGenerator,
}

impl KeyStore {
    pub fn new(paths: KeyPaths, passphrase: KeyPassphrase, generator: KeyMaterialGenerator) -> Self {
        Self {
            paths,
            passphrase,
            generator,
        }
    }

    pub fn paths(&self) -> &KeyPaths {
        &self.paths
    }

    /// True when all three artifacts exist
    pub fn is_complete(&self) -> bool {
        self.paths.all().iter().all(|p| p.exists())
    }

    /// Make sure a usable key set is on disk
    ///
    /// With all three artifacts present nothing is read here; keys are
    /// loaded on demand. Otherwise a fresh set is generated, written and
    /// read back once to prove it decodes.
    pub fn initialize(&self) -> Result<InitOutcome> {
        if self.is_complete() {
            debug!(private_key = %self.paths.private_key.display(), "key artifacts present");
            return Ok(InitOutcome::Existing);
        }

        let _lock = BootstrapLock::acquire(self.paths.lock_file())?;
        // Another bootstrapper may have finished between the check and the lock
        if self.is_complete() {
            debug!("key artifacts completed by another bootstrapper");
            return Ok(InitOutcome::Existing);
        }

        let stale: Vec<&Path> = self.paths.all().into_iter().filter(|p| p.exists()).collect();
        if !stale.is_empty() {
            warn!(
                ?stale,
                "incomplete key artifact set; regenerating all keys and replacing existing artifacts"
            );
        }
        let replace = |path: &Path| stale.iter().any(|p| *p == path);

        let material = self.generator.generate()?;
        let paths = &self.paths;

        write_artifact(
            &paths.private_key,
            encode_private_key(&material.private_key, &self.passphrase)?.as_bytes(),
            replace(paths.private_key.as_path()),
        )?;
        write_artifact(
            &paths.public_key,
            encode_public_key(&material.public_key)?.as_bytes(),
            replace(paths.public_key.as_path()),
        )?;
        // Blob goes last: a crash before this point leaves an incomplete set
        // that the next start regenerates
        write_artifact(
            &paths.content_key,
            &wrap_content_key(&material.content_key, &material.public_key)?,
            replace(paths.content_key.as_path()),
        )?;

        let private_key = self.load_private_key()?;
        let public_key = self.load_public_key()?;
        let reloaded = self.load_content_key(&private_key)?;
        if reloaded.expose_secret() != material.content_key.expose_secret() {
            return Err(CoreError::KeyUnwrap(
                "content key read back from disk does not match the generated key".into(),
            ));
        }

        info!(
            fingerprint = %public_key_fingerprint(&public_key)?,
            modulus_bits = self.generator.modulus_bits(),
            "generated new key set"
        );
        Ok(InitOutcome::Generated)
    }

    pub fn load_private_key(&self) -> Result<RsaPrivateKey> {
        let pem = read_text(&self.paths.private_key)?;
        decode_private_key(&pem, &self.passphrase)
    }

    pub fn load_public_key(&self) -> Result<RsaPublicKey> {
        let pem = read_text(&self.paths.public_key)?;
        decode_public_key(&pem)
    }

    /// Read the wrapped blob and unwrap it with `private_key`
    pub fn load_content_key(&self, private_key: &RsaPrivateKey) -> Result<ContentKey32> {
        let path = &self.paths.content_key;
        let wrapped = fs::read(path).map_err(|e| CoreError::storage(path, e))?;
        unwrap_content_key(&wrapped, private_key)
    }

    /// Wrap `key` under `public_key` and write the blob
    pub fn save_content_key(&self, key: &ContentKey32, public_key: &RsaPublicKey) -> Result<()> {
        let wrapped = wrap_content_key(key, public_key)?;
        write_artifact(&self.paths.content_key, &wrapped, true)
    }
}

/// Exclusive marker held for the whole generation step, removed on drop
struct BootstrapLock {
    path: PathBuf,
}

impl BootstrapLock {
    fn acquire(path: PathBuf) -> Result<Self> {
        create_parent(&path)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| CoreError::storage(&path, e))?;
        // Owner pid, for whoever has to clean up after a crash
        writeln!(file, "{}", std::process::id()).map_err(|e| CoreError::storage(&path, e))?;
        debug!(lock = %path.display(), "bootstrap lock taken");
        Ok(Self { path })
    }
}

impl Drop for BootstrapLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(lock = %self.path.display(), error = %e, "could not remove bootstrap lock");
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CoreError::storage(path, e))
}

fn create_parent(path: &Path) -> Result<&Path> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| CoreError::storage(dir, e))?;
    Ok(dir)
}

/// Write via a sibling temp file (created 0600 on unix) and rename into place.
/// Unless `replace` is set the target is created without clobbering, so an
/// existing file makes this call fail with `AlreadyExists`.
fn write_artifact(path: &Path, contents: &[u8], replace: bool) -> Result<()> {
    let dir = create_parent(path)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CoreError::storage(dir, e))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| CoreError::storage(path, e))?;

    let persisted = if replace {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    persisted
        .map(|_| ())
        .map_err(|e| CoreError::storage(path, e.error))
}
