use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ukcp-cvs",
    about = "Maps raw UKCP18 vocab files to a normalized controlled-vocabulary archive",
    version
)]
pub struct Cli {
    /// Directory from which raw vocab files are read
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,

    /// Archive root the authority tree is written under
    #[arg(long, value_name = "DIR", env = "UKCP_CV_ARCHIVE_DIR", default_value = "cv-archive")]
    pub archive_dir: PathBuf,

    /// Namespace → uid map reused across runs (omit to mint fresh uids)
    #[arg(long, value_name = "FILE", env = "UKCP_CV_UID_MAP")]
    pub uid_map: Option<PathBuf>,

    /// Output the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn source_is_required_and_defaults_apply() {
        assert!(Cli::try_parse_from(["ukcp-cvs"]).is_err());

        let cli = Cli::try_parse_from(["ukcp-cvs", "--source", "raw", "--uid-map", "uids.json"])
            .expect("arguments should parse");
        assert_eq!(cli.source, PathBuf::from("raw"));
        assert_eq!(cli.uid_map, Some(PathBuf::from("uids.json")));
        assert!(!cli.json);
    }
}
