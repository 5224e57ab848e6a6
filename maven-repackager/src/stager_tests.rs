//! Unit tests for staging into the repository layout.

use super::*;
use crate::checksum::{ChecksumAlgorithm, compute_checksums};
use crate::template::{EmbeddedTemplates, MockTemplateProvider};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct StagingContext {
    _temp_dir: TempDir,
    base: Utf8PathBuf,
    stager: Stager,
}

impl StagingContext {
    fn new(packaging: PackagingKind) -> Self {
        let temp_dir = TempDir::new().expect("temp dir creation succeeds");
        let base = Utf8PathBuf::try_from(temp_dir.path().to_owned()).expect("UTF-8 temp dir");
        let stager = Stager::new(
            base.join("repo"),
            "com.example.lib",
            "foo",
            "1.2.3",
            packaging,
        );
        Self {
            _temp_dir: temp_dir,
            base,
            stager,
        }
    }

    fn input(&self, name: &str, content: &[u8]) -> Utf8PathBuf {
        let path = self.base.join(name);
        fs::write(&path, content).expect("write input");
        path
    }
}

#[fixture]
fn aar_context() -> StagingContext {
    StagingContext::new(PackagingKind::Aar)
}

fn fixed_timestamp() -> MetadataTimestamp {
    MetadataTimestamp::try_from("20180101093000").expect("valid stamp")
}

fn assert_sidecars_match(path: &Utf8Path) {
    let checksums = compute_checksums(path).expect("checksums");
    for algorithm in ChecksumAlgorithm::ALL {
        let sidecar = fs::read_to_string(algorithm.sidecar_path(path)).expect("sidecar exists");
        assert_eq!(sidecar, checksums.get(algorithm).as_str());
    }
}

#[rstest]
fn prepare_creates_version_dir(aar_context: StagingContext) {
    aar_context.stager.prepare().expect("prepare succeeds");
    assert!(aar_context.stager.layout().version_dir().is_dir());
    assert!(aar_context.stager.layout().metadata_dir().is_dir());
}

#[rstest]
fn prepare_refuses_existing_staging_root(aar_context: StagingContext) {
    fs::create_dir_all(aar_context.stager.staging_root()).expect("pre-create root");
    let err = aar_context.stager.prepare().expect_err("existing root rejected");
    assert!(matches!(err, RepackagerError::StagingDirExists { .. }));
}

#[rstest]
fn artifact_is_copied_with_sidecars(aar_context: StagingContext) {
    let input = aar_context.input("lib-release.aar", b"aar bytes");
    aar_context.stager.prepare().expect("prepare succeeds");

    let staged = aar_context
        .stager
        .stage_artifact(&input)
        .expect("artifact staged");

    assert_eq!(staged.path.file_name(), Some("foo-1.2.3.aar"));
    assert_eq!(fs::read(&staged.path).expect("read staged"), b"aar bytes");
    assert_sidecars_match(&staged.path);
}

#[rstest]
fn missing_artifact_reports_copy_failure(aar_context: StagingContext) {
    aar_context.stager.prepare().expect("prepare succeeds");
    let missing = aar_context.base.join("missing.aar");

    let err = aar_context
        .stager
        .stage_artifact(&missing)
        .expect_err("copy fails");
    assert!(matches!(
        err,
        RepackagerError::CopyFile { from, .. } if from == missing
    ));
}

#[rstest]
fn unwritable_destination_is_named_in_copy_failure(aar_context: StagingContext) {
    aar_context.stager.prepare().expect("prepare succeeds");
    let input = aar_context.input("input.aar", b"aar bytes");
    let version_dir = aar_context.stager.layout().version_dir().to_owned();
    fs::remove_dir(&version_dir).expect("remove version dir");

    let err = aar_context
        .stager
        .stage_artifact(&input)
        .expect_err("copy fails");

    let expected_dest = version_dir.join("foo-1.2.3.aar");
    let msg = err.to_string();
    assert!(msg.contains(input.as_str()), "{msg}");
    assert!(msg.contains(expected_dest.as_str()), "{msg}");
    assert!(matches!(
        err,
        RepackagerError::CopyFile { from, to, .. } if from == input && to == expected_dest
    ));
}

#[rstest]
#[case::aar(PackagingKind::Aar, "<packaging>aar</packaging>")]
#[case::jar(PackagingKind::Jar, "<packaging>jar</packaging>")]
fn pom_carries_coordinate_and_packaging(#[case] packaging: PackagingKind, #[case] expected: &str) {
    let context = StagingContext::new(packaging);
    context.stager.prepare().expect("prepare succeeds");

    let staged = context
        .stager
        .stage_pom(&EmbeddedTemplates)
        .expect("pom staged");

    let pom = fs::read_to_string(&staged.path).expect("read pom");
    assert!(pom.contains("<groupId>com.example.lib</groupId>"));
    assert!(pom.contains("<artifactId>foo</artifactId>"));
    assert!(pom.contains("<version>1.2.3</version>"));
    assert!(pom.contains(expected));
    assert!(!pom.contains("_HERE"));
    assert_sidecars_match(&staged.path);
}

#[rstest]
fn metadata_lands_at_artifact_level(aar_context: StagingContext) {
    aar_context.stager.prepare().expect("prepare succeeds");

    let staged = aar_context
        .stager
        .stage_metadata(&EmbeddedTemplates, &fixed_timestamp())
        .expect("metadata staged");

    assert_eq!(staged.path, aar_context.stager.layout().metadata_path());
    let metadata = fs::read_to_string(&staged.path).expect("read metadata");
    assert!(metadata.contains("<lastUpdated>20180101093000</lastUpdated>"));
    assert!(metadata.contains("<version>1.2.3</version>"));
    assert!(!metadata.contains("_HERE"));
    assert_sidecars_match(&staged.path);
}

#[rstest]
fn metadata_uses_provided_template(aar_context: StagingContext) {
    aar_context.stager.prepare().expect("prepare succeeds");
    let mut templates = MockTemplateProvider::new();
    templates
        .expect_template()
        .withf(|kind| *kind == TemplateKind::Metadata)
        .times(1)
        .returning(|_| Ok("ARTIFACT_ID_HERE@ARTIFACT_DATE_HERE".to_owned()));

    let staged = aar_context
        .stager
        .stage_metadata(&templates, &fixed_timestamp())
        .expect("metadata staged");

    let metadata = fs::read_to_string(&staged.path).expect("read metadata");
    assert_eq!(metadata, "foo@20180101093000");
}

#[rstest]
fn template_failure_stops_before_writing(aar_context: StagingContext) {
    aar_context.stager.prepare().expect("prepare succeeds");
    let mut templates = MockTemplateProvider::new();
    templates.expect_template().returning(|kind| {
        Err(RepackagerError::ResourceMissing {
            name: kind.file_name(),
            path: Utf8PathBuf::from("/nowhere"),
        })
    });

    let err = aar_context
        .stager
        .stage_pom(&templates)
        .expect_err("template missing");
    assert!(matches!(err, RepackagerError::ResourceMissing { .. }));
    assert!(!aar_context.stager.layout().pom_path().exists());
}

#[rstest]
fn sources_are_renamed(aar_context: StagingContext) {
    let sources = aar_context.input("whatever.jar", b"source bytes");
    aar_context.stager.prepare().expect("prepare succeeds");

    let staged = aar_context
        .stager
        .stage_sources(&sources)
        .expect("sources staged");

    assert_eq!(staged.path.file_name(), Some("foo-1.2.3-sources.jar"));
    assert_sidecars_match(&staged.path);
}
