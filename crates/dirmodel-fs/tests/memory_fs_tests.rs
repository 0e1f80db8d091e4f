use dirmodel_fs::{Error, FileSystem, MemoryFs, Operation};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};

fn seeded() -> MemoryFs {
    let fs = MemoryFs::new();
    fs.add_dir("/work/src")
        .add_file("/work/README.md")
        .add_dir("/shared/assets")
        .add_symlink("/work/assets", "/shared/assets")
        .add_symlink("/work/dangling", "/nowhere");
    fs
}

#[rstest]
#[case("/work", true, true, false)]
#[case("/work/src", true, true, false)]
#[case("/work/README.md", true, false, false)]
#[case("/work/assets", true, true, true)]
#[case("/work/dangling", false, false, true)]
#[case("/work/missing", false, false, false)]
fn test_entry_kinds(
    #[case] path: &str,
    #[case] exists: bool,
    #[case] is_dir: bool,
    #[case] is_symlink: bool,
) {
    let fs = seeded();
    let path = Path::new(path);

    assert_eq!(fs.exists(path), exists, "exists({})", path.display());
    assert_eq!(fs.is_dir(path), is_dir, "is_dir({})", path.display());
    assert_eq!(fs.is_symlink(path), is_symlink, "is_symlink({})", path.display());
}

#[test]
fn test_seeding_records_no_operations() {
    let fs = seeded();
    assert!(fs.operations().is_empty());
}

#[test]
fn test_create_dir_all_records_once() {
    let fs = MemoryFs::new();
    fs.create_dir_all(Path::new("/a/b/c")).unwrap();
    fs.create_dir_all(Path::new("/a/b/c")).unwrap();

    assert!(fs.is_dir(Path::new("/a")));
    assert!(fs.is_dir(Path::new("/a/b")));
    assert_eq!(
        fs.operations(),
        vec![Operation::CreateDir(PathBuf::from("/a/b/c"))]
    );
}

#[test]
fn test_create_dir_all_through_file_fails() {
    let fs = seeded();
    let result = fs.create_dir_all(Path::new("/work/README.md/nested"));

    assert!(matches!(result, Err(Error::NotADirectory { .. })));
    assert!(fs.operations().is_empty());
}

#[test]
fn test_create_dir_all_through_symlinked_dir() {
    let fs = seeded();
    fs.create_dir_all(Path::new("/work/assets/icons")).unwrap();

    assert!(fs.is_dir(Path::new("/shared/assets/icons")));
}

#[test]
fn test_symlink_is_recorded_verbatim() {
    let fs = seeded();
    fs.symlink(Path::new("../shared"), Path::new("/work/link"))
        .unwrap();

    assert!(fs.is_symlink(Path::new("/work/link")));
    assert!(fs.same_entry(Path::new("/work/link"), Path::new("/shared")).unwrap());
    assert_eq!(
        fs.operations(),
        vec![Operation::Symlink {
            target: PathBuf::from("../shared"),
            link: PathBuf::from("/work/link"),
        }]
    );
}

#[test]
fn test_symlink_over_existing_entry_fails() {
    let fs = seeded();

    let over_dir = fs.symlink(Path::new("/shared"), Path::new("/work/src"));
    let over_dangling = fs.symlink(Path::new("/shared"), Path::new("/work/dangling"));

    assert!(matches!(over_dir, Err(Error::AlreadyExists { .. })));
    assert!(matches!(over_dangling, Err(Error::AlreadyExists { .. })));
}

#[test]
fn test_symlink_into_missing_parent_fails() {
    let fs = MemoryFs::new();
    let result = fs.symlink(Path::new("/target"), Path::new("/missing/link"));

    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[test]
fn test_same_entry() {
    let fs = seeded();

    assert!(fs.same_entry(Path::new("/work/assets"), Path::new("/shared/assets")).unwrap());
    assert!(fs.same_entry(Path::new("/work/src/.."), Path::new("/work")).unwrap());
    assert!(!fs.same_entry(Path::new("/work/src"), Path::new("/work")).unwrap());
    assert!(!fs.same_entry(Path::new("/work/missing"), Path::new("/work/missing")).unwrap());
}
