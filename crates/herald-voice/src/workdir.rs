//! Per-user working directories and scoped temporary audio files.
//!
//! Each user gets their own subdirectory under the configured root, created
//! lazily on first use and never removed here (retention is out of scope).
//! Files inside it are handed around as [`AudioArtifact`] guards: dropping
//! a guard deletes the file, so every exit path of a pipeline invocation
//! cleans up after itself without scattered delete calls.

use herald_types::UserId;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Root of the audio working area, namespaced per user.
#[derive(Debug, Clone)]
pub struct WorkdirRoot {
    root: PathBuf,
}

impl WorkdirRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the user's working directory, creating it if needed.
    pub fn for_user(&self, user: UserId) -> std::io::Result<UserWorkdir> {
        let dir = self.root.join(user.to_string());
        std::fs::create_dir_all(&dir)?;
        Ok(UserWorkdir { dir })
    }
}

/// A single user's working directory.
#[derive(Debug, Clone)]
pub struct UserWorkdir {
    dir: PathBuf,
}

impl UserWorkdir {
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Claims a file name inside this directory as a scoped artifact.
    ///
    /// The file need not exist yet; whoever writes it, the guard deletes
    /// it on drop.
    pub fn claim(&self, file_name: &str) -> AudioArtifact {
        AudioArtifact {
            path: self.dir.join(file_name),
            armed: true,
        }
    }
}

/// Owned temporary audio file, deleted when the guard drops.
#[derive(Debug)]
pub struct AudioArtifact {
    path: PathBuf,
    armed: bool,
}

impl AudioArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Releases the file from the guard; the caller becomes responsible
    /// for deleting it.
    pub fn into_path(mut self) -> PathBuf {
        self.armed = false;
        self.path.clone()
    }
}

impl Drop for AudioArtifact {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "failed to remove audio artifact");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workdir_is_created_lazily_per_user() {
        let tmp = tempfile::tempdir().unwrap();
        let root = WorkdirRoot::new(tmp.path());

        let expected = tmp.path().join("42");
        assert!(!expected.exists());

        let workdir = root.for_user(UserId(42)).unwrap();
        assert_eq!(workdir.path(), expected);
        assert!(expected.is_dir());
    }

    #[test]
    fn artifact_is_deleted_on_drop() {
        let tmp = tempfile::tempdir().unwrap();
        let workdir = WorkdirRoot::new(tmp.path()).for_user(UserId(1)).unwrap();

        let artifact = workdir.claim("turn.ogg");
        std::fs::write(artifact.path(), b"opus").unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn into_path_disarms_the_guard() {
        let tmp = tempfile::tempdir().unwrap();
        let workdir = WorkdirRoot::new(tmp.path()).for_user(UserId(1)).unwrap();

        let artifact = workdir.claim("reply.ogg");
        std::fs::write(artifact.path(), b"opus").unwrap();

        let path = artifact.into_path();
        assert!(path.exists());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn dropping_a_never_written_artifact_is_harmless() {
        let tmp = tempfile::tempdir().unwrap();
        let workdir = WorkdirRoot::new(tmp.path()).for_user(UserId(1)).unwrap();
        drop(workdir.claim("never_written.mp3"));
    }
}
