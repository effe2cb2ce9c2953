/*!
 * Integration tests for controller workflows
 */

use std::fs;
use anyhow::Result;

use vttclean::app_config::Config;
use vttclean::app_controller::{Controller, FolderSummary};
use vttclean::cue_table::TableFormat;
use vttclean::word_count::WordCountLanguage;
use crate::common;

fn controller() -> Result<Controller> {
    Controller::with_config(Config::default())
}

/// Test that a single file is cleaned to the default sibling path
#[test]
fn test_run_withDefaultOutput_shouldWriteSuffixedFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "call.vtt")?;

    let report = controller()?.run(&input, None, false)?;

    assert!(report.is_some());
    let output = temp_dir.path().join("call.cleaned.vtt");
    assert_eq!(fs::read_to_string(output)?.matches("<v Bob>Thank you.").count(), 1);
    Ok(())
}

/// Test that existing outputs are kept unless forced
#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "call.vtt")?;
    let output = common::create_test_file(temp_dir.path(), "call.cleaned.vtt", "keep me")?;
    let controller = controller()?;

    assert!(controller.run(&input, None, false)?.is_none());
    assert_eq!(fs::read_to_string(&output)?, "keep me");

    assert!(controller.run(&input, Some(output.as_path()), true)?.is_some());
    assert!(fs::read_to_string(&output)?.starts_with("WEBVTT"));
    Ok(())
}

/// Test that a missing input file is an error
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.vtt");

    assert!(controller()?.run(&missing, None, false).is_err());
    Ok(())
}

/// Test folder mode across nested directories, including previous outputs
#[test]
fn test_run_folder_withNestedTranscripts_shouldCleanEachOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("week2");
    fs::create_dir_all(&nested)?;

    common::create_test_transcript(temp_dir.path(), "monday.vtt")?;
    common::create_test_transcript(&nested, "tuesday.vtt")?;
    common::create_test_file(temp_dir.path(), "readme.txt", "not a transcript")?;

    let controller = controller()?;
    let summary = controller.run_folder(temp_dir.path(), false)?;

    assert_eq!(summary, FolderSummary { cleaned: 2, skipped: 0, failed: 0 });
    assert!(temp_dir.path().join("monday.cleaned.vtt").exists());
    assert!(nested.join("tuesday.cleaned.vtt").exists());
    assert!(!temp_dir.path().join("monday.cleaned.cleaned.vtt").exists());

    let log = fs::read_to_string(temp_dir.path().join("vttclean.log"))?;
    assert!(log.contains("2 cleaned, 0 skipped, 0 errors"));

    let summary = controller.run_folder(temp_dir.path(), false)?;
    assert_eq!(summary, FolderSummary { cleaned: 0, skipped: 2, failed: 0 });
    Ok(())
}

/// Test that a folder without transcripts is an error
#[test]
fn test_run_folder_withoutTranscripts_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "notes.txt", "nothing")?;

    assert!(controller()?.run_folder(temp_dir.path(), false).is_err());
    Ok(())
}

/// Test that one unreadable transcript does not stop the others
#[test]
fn test_run_folder_withInvalidUtf8File_shouldCountFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_transcript(temp_dir.path(), "good.vtt")?;
    fs::write(temp_dir.path().join("broken.vtt"), [0xffu8, 0xfe, 0x00])?;

    let summary = controller()?.run_folder(temp_dir.path(), false)?;

    assert_eq!(summary, FolderSummary { cleaned: 1, skipped: 0, failed: 1 });
    assert!(!temp_dir.path().join("broken.cleaned.vtt").exists());
    Ok(())
}

/// Test word counting with the default summary path
#[test]
fn test_count_words_withDefaultOutput_shouldWriteSummaryCsv() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "meeting.vtt")?;

    let (report, output_path) = controller()?.count_words(&input, Some(WordCountLanguage::En), None)?;

    assert_eq!(output_path, temp_dir.path().join("meeting_summary.csv"));
    assert_eq!(report.get("Alice"), Some(6));
    assert_eq!(report.get("Bob"), Some(8));
    assert_eq!(
        fs::read_to_string(&output_path)?,
        "Speaker,Word Count\nAlice,6\nBob,8\nTotal,14\n"
    );
    Ok(())
}

/// Test cue table export with the format taken from the extension
#[test]
fn test_export_table_withJsonExtension_shouldWriteJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "meeting.vtt")?;
    let output = temp_dir.path().join("meeting.json");

    let table = controller()?.export_table(&input, &output, None)?;

    assert_eq!(table.len(), 6);
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(value.as_array().map(|rows| rows.len()), Some(6));
    assert_eq!(value[0]["speaker"], "Alice");
    assert_eq!(value[0]["content"], "Welcome to the meeting.");
    Ok(())
}

/// Test that an explicit format wins over the extension
#[test]
fn test_export_table_withExplicitCsv_shouldWriteCsv() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "meeting.vtt")?;
    let output = temp_dir.path().join("meeting.table");

    controller()?.export_table(&input, &output, Some(TableFormat::Csv))?;

    let csv = fs::read_to_string(&output)?;
    assert!(csv.starts_with("Start,End,Speaker,Content\n"));
    assert_eq!(csv.lines().count(), 7);
    Ok(())
}
