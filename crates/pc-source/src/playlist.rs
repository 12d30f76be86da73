use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use pc_core::session::Navigation;

use crate::loader::is_scene_file;

/// Liste ordonnée des fichiers de scène à parcourir.
///
/// Construite à partir des chemins de la ligne de commande : les fichiers
/// sont gardés tels quels, les dossiers explorés récursivement.
///
/// # Example
/// ```
/// use pc_core::session::Navigation;
/// use pc_source::playlist::Playlist;
/// use std::path::PathBuf;
///
/// let mut list = Playlist::from_files(vec![PathBuf::from("a.lbm"), PathBuf::from("b.json")]);
/// assert_eq!(list.navigate(Navigation::Previous), Some(1));
/// assert_eq!(list.current().map(|p| p.to_string_lossy().into_owned()), Some("b.json".into()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    files: Vec<PathBuf>,
    current: usize,
}

impl Playlist {
    /// Construit la liste depuis des fichiers et/ou dossiers.
    ///
    /// # Errors
    /// Retourne une erreur si un dossier ne peut être lu.
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_dir() {
                let mut found = Vec::new();
                scan_dir(path, &mut found)?;
                found.sort();
                log::info!("{} : {} scènes trouvées", path.display(), found.len());
                files.extend(found);
            } else {
                files.push(path.clone());
            }
        }
        Ok(Self::from_files(files))
    }

    /// Playlist over an explicit list, starting at the first entry.
    #[must_use]
    pub fn from_files(files: Vec<PathBuf>) -> Self {
        Self { files, current: 0 }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// `true` when there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Position of the current entry.
    #[must_use]
    pub fn index(&self) -> usize {
        self.current
    }

    /// Path of the current entry.
    #[must_use]
    pub fn current(&self) -> Option<&Path> {
        self.files.get(self.current).map(PathBuf::as_path)
    }

    /// Déplace la position courante. Next/Previous bouclent aux extrémités.
    ///
    /// Renvoie la nouvelle position, ou `None` si la liste est vide ou
    /// l'index hors limites (la position ne change pas).
    pub fn navigate(&mut self, nav: Navigation) -> Option<usize> {
        let len = self.files.len();
        if len == 0 {
            return None;
        }
        let target = match nav {
            Navigation::Next => (self.current + 1) % len,
            Navigation::Previous => (self.current + len - 1) % len,
            Navigation::Index(i) if i < len => i,
            Navigation::Index(_) => return None,
            Navigation::Last => len - 1,
        };
        self.current = target;
        Some(target)
    }
}

/// Extrait récursivement les fichiers de scène reconnus.
///
/// Les liens symboliques rencontrés pendant l'exploration sont ignorés.
fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_symlink() {
            log::debug!("lien ignoré : {}", path.display());
        } else if path.is_dir() {
            scan_dir(&path, files)?;
        } else if is_scene_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}
