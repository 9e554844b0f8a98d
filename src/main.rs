use log::{error, info, warn, LevelFilter};
use rbtree_index::RedBlackTree;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

const USAGE: &str = "usage: rbtree-index [--search WORD] [--remove WORD] FILE...";

struct Options {
    files: Vec<PathBuf>,
    search: String,
    remove: String,
}

fn parse_args<I>(mut args: I) -> Result<Options, String>
where
    I: Iterator<Item = String>,
{
    let mut options = Options {
        files: Vec::new(),
        search: String::from("Ayyoub"),
        remove: String::from("ayyoub"),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--search" => options.search = args.next().ok_or("--search expects a word")?,
            "--remove" => options.remove = args.next().ok_or("--remove expects a word")?,
            "-h" | "--help" => return Err(String::from(USAGE)),
            _ => options.files.push(PathBuf::from(arg)),
        }
    }

    if options.files.is_empty() {
        return Err(String::from(USAGE));
    }
    Ok(options)
}

fn time<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let ret = f();
    (ret, start.elapsed())
}

fn label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_file(tree: &mut RedBlackTree<String>, path: &Path, options: &Options) -> io::Result<()> {
    let contents = fs::read_to_string(path)?;
    let label = label(path);

    let (_, elapsed) = time(|| {
        for word in contents.split_whitespace() {
            tree.insert(word.to_owned());
        }
    });
    info!("{}-Insertion: {} words in {:?}", label, tree.len(), elapsed);

    let (found, elapsed) = time(|| tree.contains(&options.search));
    info!("{}-Search: {:?} (found: {})", label, elapsed, found);

    let (removed, elapsed) = time(|| tree.remove(&options.remove));
    info!("{}-Remove: {:?} (removed: {})", label, elapsed, removed);

    if let Err(err) = tree.validate() {
        warn!("{}: {}", label, err);
    }

    tree.clear();
    Ok(())
}

fn main() {
    let level = env::var("RBTREE_LOG")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    let logger = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    if let Err(err) = logger {
        eprintln!("failed to initialize logging: {}", err);
    }

    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        },
    };

    let mut tree = RedBlackTree::new();
    for path in &options.files {
        if let Err(err) = run_file(&mut tree, path, &options) {
            error!("Error reading {}: {}", path.display(), err);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_args;

    fn args(args: &[&str]) -> impl Iterator<Item = String> {
        args.iter().map(|arg| arg.to_string()).collect::<Vec<String>>().into_iter()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(args(&["1M_words.txt"])).unwrap();
        assert_eq!(options.files.len(), 1);
        assert_eq!(options.search, "Ayyoub");
        assert_eq!(options.remove, "ayyoub");
    }

    #[test]
    fn test_parse_probes() {
        let options = parse_args(args(&["--search", "a", "x.txt", "--remove", "b"])).unwrap();
        assert_eq!(options.search, "a");
        assert_eq!(options.remove, "b");
        assert_eq!(options.files.len(), 1);
    }

    #[test]
    fn test_parse_requires_files() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--search"])).is_err());
    }
}
