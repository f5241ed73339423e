/*!
 * End-to-end tests for a translation session over a real file
 */

use std::fs;

use anyhow::Result;
use yamler::errors::{ReviewError, SessionError};
use yamler::providers::mock::MockProvider;
use yamler::review::{ReviewDecision, ScriptedReviewer};
use yamler::session::{SessionOutcome, TranslationSession};

use crate::common::{self, SAMPLE_SOURCE};

const SAMPLE_ACCEPTED: &str = concat!(
    "# Plugin messages\n",
    "prefix: '&6[ru] [Shop]&r[ru]  '\n",
    "greeting: \"[ru] Hello %player%[ru] !\"\n",
    "\n",
    "farewell: '[ru] Goodbye, <gradient>[ru] friend</gradient>'\n",
    "click: \"<click:run_command:/help>[ru] Click here</click>[ru]  for help\"\n",
    "nested:\n",
    "  warning: '<red>[ru] Don''t do that</red>'\n",
);

/// Test a full run where every suggestion is accepted
#[tokio::test]
async fn test_session_withAllAccepted_shouldWriteTranslatedFile() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "en.yml", SAMPLE_SOURCE)?;
    let target = temp_dir.path().join("ru.yml");

    let provider = MockProvider::working();
    let mut reviewer = ScriptedReviewer::always(ReviewDecision::AcceptSuggested);

    let session = TranslationSession::open(&source, &target, common::session_options())?;
    let report = session.run(&provider, &mut reviewer).await?;

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert_eq!(report.target, target);
    assert_eq!(common::read_file(&target), SAMPLE_ACCEPTED);
    assert_eq!(report.stats.lines, 8);
    assert_eq!(report.stats.passthrough, 3);
    assert_eq!(report.stats.accepted, 5);
    assert_eq!(
        reviewer.reviewed_keys(),
        ["prefix", "greeting", "farewell", "click", "warning"]
    );
    assert!(!session.staging_path().exists());
    // The source is never modified
    assert_eq!(common::read_file(&source), SAMPLE_SOURCE);
    Ok(())
}

/// Test that keeping every original value reproduces the source byte for byte
#[tokio::test]
async fn test_session_withAllKept_shouldReproduceSource() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "en.yml", SAMPLE_SOURCE)?;
    let target = temp_dir.path().join("copy.yml");

    let mut reviewer = ScriptedReviewer::always(ReviewDecision::KeepOriginal);
    let session = TranslationSession::open(&source, &target, common::session_options())?;
    let report = session.run(&MockProvider::working(), &mut reviewer).await?;

    assert_eq!(common::read_file(&target), SAMPLE_SOURCE);
    assert_eq!(report.stats.kept, 5);
    Ok(())
}

/// Test that comments and blank lines keep their position and content
#[tokio::test]
async fn test_session_withPassthroughLines_shouldCopyVerbatim() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "# comment\r\n\n   \na: 'x'\n  # indented comment  \nlist:\n  - item\nb: \"y\"\n# no newline at end";
    let source = common::create_test_file(temp_dir.path(), "en.yml", content)?;
    let target = temp_dir.path().join("ru.yml");

    let mut reviewer = ScriptedReviewer::new([
        ReviewDecision::Override("икс".to_string()),
        ReviewDecision::Override("игрек".to_string()),
    ]);
    let session = TranslationSession::open(&source, &target, common::session_options())?;
    session.run(&MockProvider::working(), &mut reviewer).await?;

    assert_eq!(
        common::read_file(&target),
        "# comment\r\n\n   \na: 'икс'\n  # indented comment  \nlist:\n  - item\nb: \"игрек\"\n# no newline at end"
    );
    Ok(())
}

/// Test save-and-stop part way through the file
#[tokio::test]
async fn test_session_withSaveAndStop_shouldCommitProcessedKeysOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "en.yml", SAMPLE_SOURCE)?;
    let target = temp_dir.path().join("ru.yml");

    let provider = MockProvider::working();
    let mut reviewer = ScriptedReviewer::new([
        ReviewDecision::AcceptSuggested,
        ReviewDecision::AcceptSuggested,
        ReviewDecision::SaveAndStop,
    ]);

    let session = TranslationSession::open(&source, &target, common::session_options())?;
    let report = session.run(&provider, &mut reviewer).await?;

    assert_eq!(
        report.outcome,
        SessionOutcome::SavedAndStopped { key: "farewell".to_string() }
    );
    let written = common::read_file(&target);
    assert_eq!(
        written,
        concat!(
            "# Plugin messages\n",
            "prefix: '&6[ru] [Shop]&r[ru]  '\n",
            "greeting: \"[ru] Hello %player%[ru] !\"\n",
            "\n",
            "nested:\n",
        )
    );
    assert!(!written.contains("farewell"));
    assert_eq!(report.stats.deferred, 3);
    // Nothing after the stop is sent for translation
    assert!(!provider.requested_texts().iter().any(|t| t.contains("Click")));
    assert!(!session.staging_path().exists());
    Ok(())
}

/// Test that a reviewer going away leaves the previous target intact
#[tokio::test]
async fn test_session_withClosedReviewChannel_shouldNotCommit() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "en.yml", SAMPLE_SOURCE)?;
    let previous = "prefix: '&6[Магазин]&r '\n";
    let target = common::create_test_file(temp_dir.path(), "ru.yml", previous)?;

    // Answers the first new key, then the channel closes
    let mut reviewer = ScriptedReviewer::new([ReviewDecision::AcceptSuggested]);
    let session = TranslationSession::open(&source, &target, common::session_options())?;
    let result = session.run(&MockProvider::working(), &mut reviewer).await;

    assert!(matches!(
        result,
        Err(SessionError::Review(ReviewError::ChannelClosed))
    ));
    assert_eq!(common::read_file(&target), previous);
    assert!(!session.staging_path().exists());
    Ok(())
}

/// Test the single-run guard on the staging file
#[tokio::test]
async fn test_session_withLeftoverStagingFile_shouldRequireForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "en.yml", "a: 'x'\n")?;
    let target = temp_dir.path().join("ru.yml");
    let staging = common::create_test_file(temp_dir.path(), "ru.yml.tmp", "stale output")?;

    let session = TranslationSession::open(&source, &target, common::session_options())?;
    let result = session
        .run(&MockProvider::working(), &mut ScriptedReviewer::always(ReviewDecision::KeepOriginal))
        .await;
    assert!(matches!(result, Err(SessionError::StagingInUse(ref path)) if *path == staging));
    assert_eq!(common::read_file(&staging), "stale output");
    assert!(!target.exists());

    let mut options = common::session_options();
    options.force = true;
    let forced = TranslationSession::open(&source, &target, options)?;
    forced
        .run(&MockProvider::working(), &mut ScriptedReviewer::always(ReviewDecision::KeepOriginal))
        .await?;

    assert_eq!(common::read_file(&target), "a: 'x'\n");
    assert!(!staging.exists());
    Ok(())
}

/// Test a custom staging suffix
#[tokio::test]
async fn test_session_withCustomStagingSuffix_shouldUseIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "en.yml", "a: 'x'\n")?;
    let target = temp_dir.path().join("ru.yml");
    common::create_test_file(temp_dir.path(), "ru.yml.tmp", "unrelated")?;

    let mut options = common::session_options();
    options.staging_suffix = ".partial".to_string();
    let session = TranslationSession::open(&source, &target, options)?;
    assert_eq!(session.staging_path(), temp_dir.path().join("ru.yml.partial"));

    session
        .run(&MockProvider::working(), &mut ScriptedReviewer::always(ReviewDecision::KeepOriginal))
        .await?;
    assert_eq!(common::read_file(&target), "a: 'x'\n");
    assert_eq!(common::read_file(&temp_dir.path().join("ru.yml.tmp")), "unrelated");
    Ok(())
}

/// Test that a source file with invalid UTF-8 aborts without touching the target
#[tokio::test]
async fn test_session_withInvalidUtf8Source_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = temp_dir.path().join("en.yml");
    fs::write(&source, [b'a', b':', b' ', b'\'', 0xc3, 0x28, b'\'', b'\n'])?;
    let target = common::create_test_file(temp_dir.path(), "ru.yml", "a: 'old'\n")?;

    let session = TranslationSession::open(&source, &target, common::session_options())?;
    let result = session
        .run(&MockProvider::working(), &mut ScriptedReviewer::always(ReviewDecision::AcceptSuggested))
        .await;

    assert!(matches!(result, Err(SessionError::Source { .. })));
    assert_eq!(common::read_file(&target), "a: 'old'\n");
    assert!(!session.staging_path().exists());
    Ok(())
}
