//! Tests for `depfetch fetch`.

use super::{parse, try_parse};
use crate::cli::CliCommand;
use std::path::PathBuf;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["depfetch", "fetch", "https://example.com/a.zip", "/tmp/out"]) {
        CliCommand::Fetch {
            url,
            outdir,
            strip,
            force,
            sha256,
            args,
        } => {
            assert_eq!(url, "https://example.com/a.zip");
            assert_eq!(outdir, PathBuf::from("/tmp/out"));
            assert_eq!(strip, 0);
            assert!(!force);
            assert!(sha256.is_none());
            assert!(args.is_empty());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_all_flags_and_forwarded_args() {
    match parse(&[
        "depfetch",
        "fetch",
        "https://example.com/install.sh",
        "out",
        "--strip",
        "2",
        "--force",
        "--sha256",
        "abc",
        "--",
        "--prefix",
        "/opt/x",
    ]) {
        CliCommand::Fetch {
            strip,
            force,
            sha256,
            args,
            ..
        } => {
            assert_eq!(strip, 2);
            assert!(force);
            assert_eq!(sha256.as_deref(), Some("abc"));
            assert_eq!(args, vec!["--prefix".to_string(), "/opt/x".to_string()]);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_rejects_negative_strip() {
    let res = try_parse(&[
        "depfetch",
        "fetch",
        "https://example.com/a.zip",
        "out",
        "--strip",
        "-1",
    ]);
    assert!(res.is_err());
}

#[test]
fn cli_parse_fetch_requires_outdir() {
    let res = try_parse(&["depfetch", "fetch", "https://example.com/a.zip"]);
    assert!(res.is_err());
}
