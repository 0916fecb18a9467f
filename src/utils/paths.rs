use std::path::{Component, Path};

/// Split a path into its normal components, in order.
///
/// Root, prefix and `.` components are dropped. Component text is kept
/// lossily so names with arbitrary bytes still compare sensibly.
pub fn path_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect()
}

/// Return the last `count` components of `path`, oldest first.
///
/// Returns `None` when the path has fewer than `count` normal components.
pub fn trailing_components(path: &Path, count: usize) -> Option<Vec<String>> {
    let components = path_components(path);
    if components.len() < count {
        return None;
    }
    Some(components[components.len() - count..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_path_components_absolute() {
        let path = PathBuf::from("/var/lib/cassandra/data/ks1/cf1/snapshots");
        assert_eq!(
            path_components(&path),
            vec!["var", "lib", "cassandra", "data", "ks1", "cf1", "snapshots"]
        );
    }

    #[test]
    fn test_path_components_keeps_odd_names() {
        let path = PathBuf::from("data/ks.with.dots/cf-1 copy/snapshots");
        assert_eq!(
            path_components(&path),
            vec!["data", "ks.with.dots", "cf-1 copy", "snapshots"]
        );
    }

    #[test]
    fn test_trailing_components() {
        let path = PathBuf::from("/data/ks1/cf1/snapshots");
        assert_eq!(
            trailing_components(&path, 3),
            Some(vec!["ks1".to_string(), "cf1".to_string(), "snapshots".to_string()])
        );
        assert_eq!(trailing_components(Path::new("/snapshots"), 3), None);
    }
}
