/*!
 * Integration tests for the file cleaning workflow
 */

use std::fs;
use anyhow::Result;

use vttclean::errors::CleanError;
use vttclean::transcript_cleaner::{clean_transcript, CleanOptions};
use crate::common;

/// Test that a looping transcript is cleaned end to end
#[test]
fn test_clean_transcript_withLoopingCue_shouldWriteCollapsedFile() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "meeting.vtt")?;
    let output = temp_dir.path().join("meeting.clean.vtt");

    let report = clean_transcript(&input, &output, &CleanOptions::default())?;

    let expected = format!(
        "WEBVTT\n\n{}<v Alice>Welcome to the meeting.\n\n{}<v Bob>Thank you.\n\n{}<v Alice>Let's start.\n\n",
        common::timing_line(1),
        common::timing_line(2),
        common::timing_line(6),
    );
    assert_eq!(fs::read_to_string(&output)?, expected);

    assert_eq!(report.stats.cues_seen, 6);
    assert_eq!(report.stats.runs_collapsed, 1);
    assert_eq!(report.stats.cues_removed, 3);
    assert_eq!(report.input_lines, 20);
    assert_eq!(report.output_lines, 11);

    Ok(())
}

/// Test that non-ASCII speakers and text survive unchanged
#[test]
fn test_clean_transcript_withUnicodeContent_shouldRoundTripCharacters() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = common::vtt_document(&[
        ("Élodie", "Ça commence à l'heure ?"),
        ("Zoë", "Oui, c'est parti 🎉"),
    ]);
    let input = common::create_test_file(temp_dir.path(), "réunion.vtt", &content)?;
    let output = temp_dir.path().join("réunion.cleaned.vtt");

    clean_transcript(&input, &output, &CleanOptions::default())?;

    assert_eq!(fs::read_to_string(&output)?, content);
    Ok(())
}

/// Test that the input can be cleaned in place
#[test]
fn test_clean_transcript_withSameInputAndOutput_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_transcript(temp_dir.path(), "inplace.vtt")?;

    clean_transcript(&path, &path, &CleanOptions::default())?;

    let cleaned = fs::read_to_string(&path)?;
    assert_eq!(cleaned.matches("<v Bob>Thank you.").count(), 1);
    Ok(())
}

/// Test that a missing input fails without creating the output
#[test]
fn test_clean_transcript_withMissingInput_shouldFailAndWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("absent.vtt");
    let output = temp_dir.path().join("absent.cleaned.vtt");

    let result = clean_transcript(&input, &output, &CleanOptions::default());

    assert!(matches!(result, Err(CleanError::Read { .. })));
    assert!(!output.exists());
    Ok(())
}

/// Test that a custom threshold leaves shorter loops alone
#[test]
fn test_clean_transcript_withHigherThreshold_shouldKeepShorterRuns() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_transcript(temp_dir.path(), "meeting.vtt")?;
    let output = temp_dir.path().join("meeting.out.vtt");
    let options = CleanOptions { collapse_threshold: 5, ..CleanOptions::default() };

    let report = clean_transcript(&input, &output, &options)?;

    assert_eq!(report.stats.runs_collapsed, 0);
    assert_eq!(fs::read_to_string(&output)?.matches("<v Bob>Thank you.").count(), 4);
    Ok(())
}
