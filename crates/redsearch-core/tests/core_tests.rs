use std::fs;
use tempfile::TempDir;

use redsearch_core::config::{Config, ExpansionConfig, FeedbackStatistics};
use redsearch_core::error::Error;
use redsearch_core::ingest::PostReader;
use redsearch_core::types::{fields, Post};

const HEADER: &str = ",text,id,subreddit,meta,time,author,ups,downs,authorlinkkarma,authorkarma,authorisgold\n";

#[test]
fn read_posts_skips_header_and_row_number() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("askscience.csv");
    fs::write(&path, format!("{HEADER}0,\"Why is the sky blue, really?\",c0ffee,askscience,physics,1430438400,alice,12,1,300,4000,1\n")).unwrap();

    let posts = PostReader::new().read_posts(&path).expect("read");

    assert_eq!(posts.len(), 1);
    let p = &posts[0];
    assert_eq!(p.text, "Why is the sky blue, really?");
    assert_eq!(p.id, "c0ffee");
    assert_eq!(p.subreddit, "askscience");
    assert_eq!(p.author, "alice");
    assert_eq!((p.ups, p.downs, p.author_link_karma, p.author_karma), (12, 1, 300, 4000));
    assert!(p.author_is_gold);
}

#[test]
fn read_posts_coerces_bad_numbers_to_zero() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("a.csv");
    fs::write(&path, format!("{HEADER}7,hello,x1,pics,,t,bob,n/a,,2,3,False\n")).unwrap();

    let posts = PostReader::new().read_posts(&path).expect("read");

    assert_eq!(posts[0].ups, 0);
    assert_eq!(posts[0].downs, 0);
    assert_eq!(posts[0].author_karma, 3);
    assert!(!posts[0].author_is_gold);
}

#[test]
fn read_posts_rejects_short_rows() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.csv");
    fs::write(&path, format!("{HEADER}1,only,three\n")).unwrap();

    let err = PostReader::new().read_posts(&path).unwrap_err();
    match err {
        Error::MalformedRecord { expected, found, line, .. } => {
            assert_eq!(expected, 12);
            assert_eq!(found, 3);
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn list_csv_files_is_flat_and_sorted() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("b.csv"), HEADER).unwrap();
    fs::write(dir.join("a.csv"), HEADER).unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested/c.csv"), HEADER).unwrap();

    let files = PostReader::new().list_csv_files(dir).expect("list");
    let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_string_lossy().to_string()).collect();
    assert_eq!(names, vec!["a.csv", "b.csv"]);
}

#[test]
fn list_csv_files_missing_folder() {
    let tmp = TempDir::new().unwrap();
    let err = PostReader::new().list_csv_files(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn field_display_covers_stored_fields() {
    let post = Post { text: "hi".into(), ups: 5, author_is_gold: true, ..Post::default() };
    for name in fields::ALL { post.field_display(name).expect("known field"); }
    assert_eq!(post.field_display(fields::UPS).unwrap(), "5");
    assert!(matches!(post.field_display("karma"), Err(Error::UnknownField(_))));
}

#[test]
fn empty_config_uses_defaults() {
    let config = Config::from_toml_str("").expect("config");
    let expansion = config.expansion().unwrap();
    assert_eq!(expansion, ExpansionConfig::default());
    assert_eq!(expansion.alpha, 1.0);
    assert_eq!(expansion.beta, 0.75);
    assert_eq!(expansion.gamma, 0.15);
    assert_eq!(expansion.max_added_terms, 5);
    assert_eq!(config.search().unwrap().top, 10);
    assert!(config.analyzer().unwrap().stop_words.is_empty());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_toml_str("[expansion]\nbeta = 0.5\nstatistics = \"corpus\"\n").expect("config");
    let expansion = config.expansion().unwrap();
    assert_eq!(expansion.beta, 0.5);
    assert_eq!(expansion.gamma, 0.15);
    assert_eq!(expansion.statistics, FeedbackStatistics::Corpus);
}

#[test]
fn negative_weight_is_rejected() {
    assert!(Config::from_toml_str("[expansion]\ngamma = -1.0\n").is_err());
    let bad = ExpansionConfig { alpha: f64::NAN, ..ExpansionConfig::default() };
    assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));
}

#[test]
fn boost_requires_non_negative_threshold() {
    let err = Config::from_toml_str("[expansion]\nboost = true\nthreshold = -1.0\n").err().expect("rejected");
    assert!(err.to_string().contains("expansion.boost"));
    assert!(Config::from_toml_str("[expansion]\nthreshold = -1.0\n").is_ok());
    assert!(Config::from_toml_str("[expansion]\nboost = true\nthreshold = 0.0\n").is_ok());
}
