use std::fs;
use std::io::Write;
use tempfile::TempDir;

use passagedb_core::chunker::{chunk_count, chunk_lines};
use passagedb_core::config::{Config, Settings};
use passagedb_core::data_processor::{clean_lines, DataProcessor};
use passagedb_core::error::Error;

fn intro_lines() -> Vec<String> {
    ["The cat sat", "on the mat", "It was sunny", "A dog ran fast"].iter().map(|s| s.to_string()).collect()
}

#[test]
fn chunk_count_matches_sliding_windows() {
    for line_count in 0..8usize {
        let lines: Vec<String> = (0..line_count).map(|i| format!("line {i}")).collect();
        for window in 1..6usize {
            let chunks = chunk_lines(&lines, window);
            assert_eq!(chunks.len(), chunk_count(line_count, window), "L={line_count} w={window}");
            for (i, chunk) in chunks.iter().enumerate() {
                assert_eq!(chunk.range(), i..i + window);
                assert_eq!(chunk.content, lines[i..i + window].join(" "));
            }
        }
    }
}

#[test]
fn chunk_window_larger_than_document_is_empty() {
    let lines = intro_lines();
    assert!(chunk_lines(&lines, 5).is_empty());
    assert!(chunk_lines(&lines, 0).is_empty());
    assert!(chunk_lines::<String>(&[], 1).is_empty());
}

#[test]
fn chunk_intro_example() {
    let chunks = chunk_lines(&intro_lines(), 3);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, "The cat sat on the mat It was sunny");
    assert_eq!(chunks[0].range(), 0..3);
    assert_eq!(chunks[1].content, "on the mat It was sunny A dog ran fast");
    assert_eq!(chunks[1].range(), 1..4);
}

#[test]
fn clean_lines_trims_and_drops_blanks() {
    let lines = clean_lines("  first  \r\n\r\n\t\nsecond\rthird\n   \n");
    assert_eq!(lines, vec!["first", "second", "third"]);
}

#[test]
fn process_directory_reads_only_txt_sorted_by_name() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("b.txt"), "bravo\n\n  charlie  \n").unwrap();
    fs::write(dir.join("a.txt"), "alpha").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("c.txt"), "not top level").unwrap();

    let docs = DataProcessor::new().process_directory(dir).expect("process");

    let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(docs[1].lines, vec!["bravo", "charlie"]);
}

#[test]
fn process_directory_falls_back_to_latin1() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let mut f = fs::File::create(dir.join("latin.txt")).unwrap();
    // "café" in Latin-1 is not valid UTF-8
    f.write_all(&[b'c', b'a', b'f', 0xE9, b'\n']).unwrap();

    let docs = DataProcessor::new().process_directory(dir).expect("process");

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].lines, vec!["café"]);
}

#[test]
fn process_directory_keeps_empty_documents() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("blank.txt"), "\n   \n").unwrap();

    let docs = DataProcessor::new().process_directory(tmp.path()).expect("process");

    assert_eq!(docs.len(), 1);
    assert!(docs[0].lines.is_empty());
}

#[test]
fn process_directory_missing_dir_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = DataProcessor::new().process_directory(&tmp.path().join("missing")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
}

#[test]
fn settings_defaults_are_valid() {
    let settings = Settings::default();
    assert_eq!(settings.search.window_size, 3);
    assert_eq!(settings.data.chapters_dir, "chapters");
    settings.validate().expect("defaults validate");
}

#[test]
fn config_merges_file_and_env() {
    figment::Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file("config.toml", "[data]\nchapters_dir = \"book\"\n\n[search]\nwindow_size = 4\n")?;
        jail.set_env("APP_SEARCH__INTERACTIVE", "true");

        let settings = Config::load().and_then(|c| c.settings()).map_err(|e| e.to_string())?;
        assert_eq!(settings.data.chapters_dir, "book");
        assert_eq!(settings.search.window_size, 4);
        assert!(settings.search.interactive);
        assert_eq!(settings.embedding.max_len, 256);
        Ok(())
    });
}

#[test]
fn config_rejects_zero_window() {
    figment::Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("APP_SEARCH__WINDOW_SIZE", "0");

        let err = Config::load().and_then(|c| c.settings()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "got {err:?}");
        Ok(())
    });
}

#[test]
fn config_rejects_zero_max_len_and_batch_size() {
    for var in ["APP_EMBEDDING__MAX_LEN", "APP_EMBEDDING__BATCH_SIZE"] {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env(var, "0");

            let err = Config::load().and_then(|c| c.settings()).unwrap_err();
            match err {
                Error::InvalidConfig(msg) => assert!(msg.contains("must be at least 1"), "{var}: {msg}"),
                other => panic!("{var}: unexpected error {other:?}"),
            }
            Ok(())
        });
    }
}

#[test]
fn config_env_file_follows_rust_env() {
    figment::Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file("config.toml", "[search]\nwindow_size = 4\n")?;
        jail.create_file("config.dev.toml", "[search]\nwindow_size = 6\n")?;
        jail.create_file("config.prod.toml", "[search]\nwindow_size = 5\n\n[embedding]\nuse_fake = true\n")?;

        let config = Config::load().map_err(|e| e.to_string())?;
        assert_eq!(config.env_name(), "dev");
        assert_eq!(config.settings().map_err(|e| e.to_string())?.search.window_size, 6);

        jail.set_env("RUST_ENV", "prod");
        let config = Config::load().map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;
        assert_eq!(config.env_name(), "prod");
        assert_eq!(settings.search.window_size, 5);
        assert!(settings.embedding.use_fake);

        jail.set_env("APP_SEARCH__WINDOW_SIZE", "2");
        let settings = Config::load().and_then(|c| c.settings()).map_err(|e| e.to_string())?;
        assert_eq!(settings.search.window_size, 2);
        Ok(())
    });
}
