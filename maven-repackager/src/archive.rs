//! Zip packing of the staging tree.
//!
//! Entry names are relative to the staging root and always use `/`, so the
//! archive unpacks directly into a repository root on any platform. Entries
//! are written in sorted walk order.

use crate::error::{RepackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entries at or above this size need zip64 headers.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Suffix of the in-progress archive written beside the final path.
const PARTIAL_SUFFIX: &str = ".tmp";

/// Zip every file and directory below `staging_root` into `archive_path`.
///
/// The archive is written beside `archive_path` under a `.tmp` name and
/// renamed into place once complete, so a failed run never replaces an
/// existing archive. Returns the entry names in the order they were written.
/// Directory entries end with `/`.
///
/// # Errors
///
/// Returns [`RepackagerError::FileOperation`] naming the offending path if
/// the tree cannot be walked or read, [`RepackagerError::Archive`] if the zip
/// writer fails, and [`RepackagerError::NonUtf8Path`] for entries whose
/// names are not UTF-8.
pub fn zip_directory(staging_root: &Utf8Path, archive_path: &Utf8Path) -> Result<Vec<String>> {
    fs::metadata(staging_root)
        .map_err(|e| RepackagerError::file_operation("read", staging_root, e))?;

    let partial_path = Utf8PathBuf::from(format!("{archive_path}{PARTIAL_SUFFIX}"));
    let entries = match write_archive(staging_root, &partial_path) {
        Ok(entries) => entries,
        Err(err) => {
            if fs::remove_file(&partial_path).is_err() {
                // Nothing was created, or it is already gone.
            }
            return Err(err);
        }
    };
    fs::rename(&partial_path, archive_path)
        .map_err(|e| RepackagerError::file_operation("rename archive to", archive_path, e))?;

    debug!("wrote {} entries to {archive_path}", entries.len());
    Ok(entries)
}

fn write_archive(staging_root: &Utf8Path, partial_path: &Utf8Path) -> Result<Vec<String>> {
    let output = fs::File::create(partial_path)
        .map_err(|e| RepackagerError::file_operation("create archive", partial_path, e))?;
    let mut writer = ZipWriter::new(output);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = Vec::new();

    for entry in WalkDir::new(staging_root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map_or_else(|| staging_root.as_std_path().to_path_buf(), Path::to_path_buf);
            archive_error(&path, io::Error::from(e))
        })?;
        let name = entry_name(staging_root, entry.path())?;

        if entry.file_type().is_dir() {
            let dir_name = format!("{name}/");
            writer.add_directory(dir_name.clone(), options)?;
            trace!("archived directory {dir_name}");
            entries.push(dir_name);
        } else {
            let mut source =
                fs::File::open(entry.path()).map_err(|e| archive_error(entry.path(), e))?;
            let len = source
                .metadata()
                .map_err(|e| archive_error(entry.path(), e))?
                .len();
            writer.start_file(name.clone(), options.large_file(needs_zip64(len)))?;
            io::copy(&mut source, &mut writer).map_err(|e| archive_error(entry.path(), e))?;
            trace!("archived {name}");
            entries.push(name);
        }
    }

    writer.finish()?;
    Ok(entries)
}

/// Whether a file of `len` bytes must be stored with zip64 headers.
fn needs_zip64(len: u64) -> bool {
    len >= ZIP64_THRESHOLD
}

fn archive_error(path: &Path, source: io::Error) -> RepackagerError {
    match Utf8Path::from_path(path) {
        Some(path) => RepackagerError::file_operation("archive", path, source),
        None => RepackagerError::NonUtf8Path(path.to_path_buf()),
    }
}

/// Recursively delete the staging tree.
///
/// # Errors
///
/// Returns [`RepackagerError::FileOperation`] if removal fails.
pub fn remove_staging_dir(staging_root: &Utf8Path) -> Result<()> {
    fs::remove_dir_all(staging_root)
        .map_err(|e| RepackagerError::file_operation("remove", staging_root, e))?;
    debug!("removed staging directory {staging_root}");
    Ok(())
}

/// Archive name of `path`: its components below `root` joined with `/`.
fn entry_name(root: &Utf8Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| io::Error::other(format!("{} is outside {root}", path.display())))?;
    let parts = relative
        .components()
        .map(|component| {
            component
                .as_os_str()
                .to_str()
                .ok_or_else(|| RepackagerError::NonUtf8Path(path.to_path_buf()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::BTreeMap;
    use std::io::Read;
    use tempfile::TempDir;

    struct ArchiveContext {
        _temp_dir: TempDir,
        root: Utf8PathBuf,
        archive: Utf8PathBuf,
    }

    #[fixture]
    fn context() -> ArchiveContext {
        let temp_dir = TempDir::new().expect("temp dir");
        let base = Utf8PathBuf::try_from(temp_dir.path().to_owned()).expect("UTF-8 temp dir");
        let root = base.join("repo");
        fs::create_dir_all(root.join("org/example/foo/1.0")).expect("mkdir");
        fs::write(root.join("org/example/foo/maven-metadata.xml"), "<metadata/>")
            .expect("write metadata");
        fs::write(root.join("org/example/foo/1.0/foo-1.0.jar"), b"jar").expect("write jar");
        ArchiveContext {
            _temp_dir: temp_dir,
            root,
            archive: base.join("repo.zip"),
        }
    }

    fn read_archive(path: &Utf8Path) -> BTreeMap<String, Vec<u8>> {
        let file = fs::File::open(path).expect("open archive");
        let mut archive = zip::ZipArchive::new(file).expect("valid zip");
        let mut contents = BTreeMap::new();
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).expect("entry");
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).expect("read entry");
            contents.insert(entry.name().to_owned(), bytes);
        }
        contents
    }

    #[rstest]
    fn entries_are_relative_to_staging_root(context: ArchiveContext) {
        let entries = zip_directory(&context.root, &context.archive).expect("zip succeeds");
        assert_eq!(
            entries,
            vec![
                "org/",
                "org/example/",
                "org/example/foo/",
                "org/example/foo/1.0/",
                "org/example/foo/1.0/foo-1.0.jar",
                "org/example/foo/maven-metadata.xml",
            ]
        );
    }

    #[rstest]
    fn archive_round_trips_file_contents(context: ArchiveContext) {
        zip_directory(&context.root, &context.archive).expect("zip succeeds");

        let contents = read_archive(&context.archive);
        assert_eq!(
            contents.get("org/example/foo/1.0/foo-1.0.jar").map(Vec::as_slice),
            Some(b"jar".as_slice())
        );
        assert_eq!(
            contents
                .get("org/example/foo/maven-metadata.xml")
                .map(Vec::as_slice),
            Some(b"<metadata/>".as_slice())
        );
    }

    #[rstest]
    fn entries_are_deflated(context: ArchiveContext) {
        zip_directory(&context.root, &context.archive).expect("zip succeeds");
        let file = fs::File::open(&context.archive).expect("open archive");
        let mut archive = zip::ZipArchive::new(file).expect("valid zip");
        let entry = archive
            .by_name("org/example/foo/1.0/foo-1.0.jar")
            .expect("jar entry");
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }

    #[rstest]
    fn remove_staging_dir_deletes_tree(context: ArchiveContext) {
        remove_staging_dir(&context.root).expect("removal succeeds");
        assert!(!context.root.exists());
    }

    #[rstest]
    fn missing_staging_root_fails(context: ArchiveContext) {
        let missing = context.root.join("absent");
        assert!(zip_directory(&missing, &context.archive).is_err());
    }

    #[rstest]
    #[case::empty(0, false)]
    #[case::just_below(u64::from(u32::MAX) - 1, false)]
    #[case::at_limit(u64::from(u32::MAX), true)]
    #[case::above(u64::from(u32::MAX) + 16, true)]
    fn zip64_is_used_from_four_gibibytes(#[case] len: u64, #[case] expected: bool) {
        assert_eq!(needs_zip64(len), expected);
    }

    #[rstest]
    #[ignore = "writes a 4 GiB entry"]
    fn packs_files_larger_than_four_gibibytes(context: ArchiveContext) {
        let big = context.root.join("org/example/foo/1.0/foo-1.0.aar");
        fs::File::create(&big)
            .expect("create sparse file")
            .set_len(u64::from(u32::MAX) + 16)
            .expect("extend sparse file");

        let entries = zip_directory(&context.root, &context.archive).expect("zip succeeds");

        assert!(entries.contains(&"org/example/foo/1.0/foo-1.0.aar".to_owned()));
        let file = fs::File::open(&context.archive).expect("open archive");
        let mut archive = zip::ZipArchive::new(file).expect("valid zip");
        let entry = archive
            .by_name("org/example/foo/1.0/foo-1.0.aar")
            .expect("large entry");
        assert_eq!(entry.size(), u64::from(u32::MAX) + 16);
    }

    #[rstest]
    fn successful_run_leaves_no_partial_archive(context: ArchiveContext) {
        zip_directory(&context.root, &context.archive).expect("zip succeeds");
        assert!(context.archive.is_file());
        assert!(!Utf8PathBuf::from(format!("{}{PARTIAL_SUFFIX}", context.archive)).exists());
    }

    #[cfg(unix)]
    #[rstest]
    fn failed_run_keeps_previous_archive(context: ArchiveContext) {
        fs::write(&context.archive, b"previous archive").expect("write old archive");
        let dangling = context.root.join("org/example/foo/1.0/foo-1.0.pom");
        std::os::unix::fs::symlink(context.root.join("absent.pom"), &dangling)
            .expect("create dangling link");

        let err = zip_directory(&context.root, &context.archive).expect_err("unreadable entry");

        match err {
            RepackagerError::FileOperation { operation, path, .. } => {
                assert_eq!(operation, "archive");
                assert_eq!(path, dangling);
            }
            other => panic!("expected FileOperation, got {other:?}"),
        }
        assert_eq!(
            fs::read(&context.archive).expect("old archive survives"),
            b"previous archive"
        );
        assert!(!Utf8PathBuf::from(format!("{}{PARTIAL_SUFFIX}", context.archive)).exists());
    }
}
