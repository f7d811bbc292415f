//! Breadcrumb path bar
//!
//! Turns a directory path into one clickable segment per component plus a
//! trailing "new path" control. The bar is rebuilt from scratch on every
//! navigation; segments carry no identity between rebuilds.

use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub label: String,
    /// The path accumulated up to and including this component. The root
    /// is kept, so an absolute input gives absolute segment paths
    /// (`/home`, not `home`) that stay valid wherever the process runs.
    pub path: PathBuf,
}

/// One control in the bar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathBarItem<'a> {
    Segment(&'a PathSegment),
    /// Trailing control that saves the document somewhere new.
    NewPath,
}

#[derive(Debug, Clone, Default)]
pub struct PathBar {
    segments: Vec<PathSegment>,
}

impl PathBar {
    pub fn new(path: &Path) -> Self {
        let mut bar = Self::default();
        bar.rebuild(path);
        bar
    }

    /// Discard the current segments and derive new ones from `path`.
    ///
    /// Root and `.` components extend the running path without producing a
    /// segment, so `/home/user` yields `home` -> `/home` and
    /// `user` -> `/home/user`.
    pub fn rebuild(&mut self, path: &Path) {
        self.segments.clear();
        let mut running = PathBuf::new();

        for component in path.components() {
            match component {
                Component::RootDir | Component::CurDir => {
                    running.push(component.as_os_str());
                }
                Component::Prefix(prefix) => {
                    running.push(prefix.as_os_str());
                    self.segments.push(PathSegment {
                        label: prefix.as_os_str().to_string_lossy().into_owned(),
                        path: running.clone(),
                    });
                }
                Component::ParentDir | Component::Normal(_) => {
                    running.push(component.as_os_str());
                    self.segments.push(PathSegment {
                        label: component.as_os_str().to_string_lossy().into_owned(),
                        path: running.clone(),
                    });
                }
            }
        }

        log::debug!("path bar rebuilt for {} ({} segments)", path.display(), self.segments.len());
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Segments followed by the trailing [`PathBarItem::NewPath`] control.
    pub fn items(&self) -> impl Iterator<Item = PathBarItem<'_>> {
        self.segments
            .iter()
            .map(PathBarItem::Segment)
            .chain(std::iter::once(PathBarItem::NewPath))
    }

    /// The deepest path shown, if any.
    pub fn current(&self) -> Option<&Path> {
        self.segments.last().map(|s| s.path.as_path())
    }
}
