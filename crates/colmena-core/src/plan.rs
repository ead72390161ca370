use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::description::{ServiceDescription, non_empty_str};

/// Which list of the service description an entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Role,
    Context,
}

impl DefinitionKind {
    /// Planning order: every role, then every context.
    pub const ALL: [Self; 2] = [Self::Role, Self::Context];

    /// Top-level key holding this kind of definition.
    pub fn field(self) -> &'static str {
        match self {
            Self::Role => "dockerRoleDefinitions",
            Self::Context => "dockerContextDefinitions",
        }
    }

    /// Build context directory for a definition with the given id.
    pub fn build_path(self, build_root: &Path, id: &str) -> PathBuf {
        match self {
            Self::Role => build_root.join(id),
            Self::Context => build_root.join("context").join(id),
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role => f.write_str("role"),
            Self::Context => f.write_str("context"),
        }
    }
}

/// One image to build: final registry tag, definition id, and build context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildJob {
    pub tag: String,
    pub id: String,
    pub path: PathBuf,
    pub kind: DefinitionKind,
}

impl BuildJob {
    pub fn dockerfile(&self) -> PathBuf {
        self.path.join("Dockerfile")
    }
}

/// `<user>/<image_id>`
pub fn registry_tag(registry_user: &str, image_id: &str) -> String {
    format!("{registry_user}/{image_id}")
}

/// Derive the build jobs for `description` and rewrite its image ids.
///
/// Jobs are ordered roles first, then contexts, each in document order.
/// Every role and context `imageId` is replaced in place by the job's tag,
/// so the returned tags are exactly the image references that get
/// published. All entries are validated before anything is rewritten; on
/// error the description is left untouched.
///
/// An `imageId` that already carries the `<user>/` prefix is prefixed again.
///
/// # Errors
///
/// - [`crate::Error::MissingField`] if a definition list, `id` or `imageId` is absent
/// - [`crate::Error::InvalidField`] if one of them has the wrong type or is empty
pub fn plan_images(
    description: &mut ServiceDescription,
    build_root: &Path,
    registry_user: &str,
) -> crate::Result<Vec<BuildJob>> {
    let mut jobs = Vec::new();

    for kind in DefinitionKind::ALL {
        let entries = description.definitions(kind)?;
        for index in 0..entries.len() {
            let document = description.as_value();
            let id = non_empty_str(document, &format!("/{}/{index}/id", kind.field()))?;
            let image_id = non_empty_str(document, &format!("/{}/{index}/imageId", kind.field()))?;

            jobs.push(BuildJob {
                tag: registry_tag(registry_user, image_id),
                id: id.to_owned(),
                path: kind.build_path(build_root, id),
                kind,
            });
        }
    }

    let mut pending = jobs.iter();
    for kind in DefinitionKind::ALL {
        let Some(entries) = description.definitions_mut(kind) else {
            continue;
        };
        for (entry, job) in entries.iter_mut().zip(pending.by_ref()) {
            if let Some(object) = entry.as_object_mut() {
                object.insert("imageId".to_owned(), Value::String(job.tag.clone()));
            }
        }
    }

    for job in &jobs {
        tracing::debug!(kind = %job.kind, id = %job.id, tag = %job.tag, "planned image");
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_paths_live_under_context_dir() {
        let root = Path::new("/build");
        assert_eq!(
            DefinitionKind::Context.build_path(root, "shared"),
            PathBuf::from("/build/context/shared")
        );
        assert_eq!(
            DefinitionKind::Role.build_path(root, "worker"),
            PathBuf::from("/build/worker")
        );
    }

    #[test]
    fn registry_tag_joins_with_slash() {
        assert_eq!(registry_tag("alice", "worker:1.0"), "alice/worker:1.0");
    }
}
