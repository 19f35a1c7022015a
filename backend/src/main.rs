use moon::*;
use shared::{ContentError, DownMsg, PortfolioContent, UpMsg};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// Debug flags - set to true to enable specific debug logging
const DEBUG_BACKEND: bool = false; // Backend request/response debugging
const DEBUG_CONTENT: bool = false; // Content file resolution and parsing

const CONTENT_FILE_PATH: &str = "portfolio.toml";
const CONTENT_PATH_ENV: &str = "PORTFOLIO_CONTENT";
const BUNDLED_CONTENT: &str = include_str!("../portfolio.toml");
const BUNDLED_CONTENT_NAME: &str = "bundled portfolio.toml";

macro_rules! debug_log {
    ($flag:expr, $($arg:tt)*) => {
        if $flag {
            println!($($arg)*);
        }
    };
}

async fn frontend() -> Frontend {
    Frontend::new()
        .title("Career Journey")
        .index_by_robots(false)
}

async fn up_msg_handler(req: UpMsgRequest<UpMsg>) {
    let (session_id, cor_id) = (req.session_id, req.cor_id);

    debug_log!(DEBUG_BACKEND, "Received request: {:?}", req.up_msg);

    match req.up_msg {
        UpMsg::LoadContent => {
            let path = content_path(std::env::var_os(CONTENT_PATH_ENV));
            let down_msg = match load_content(&path).await {
                Ok((content, warnings)) => {
                    for warning in &warnings {
                        eprintln!("Content warning: {}", warning);
                    }
                    DownMsg::ContentLoaded { content, warnings }
                }
                Err(error) => {
                    eprintln!("{}", error);
                    DownMsg::ContentError(error.to_string())
                }
            };
            send_down_msg(down_msg, session_id, cor_id).await;
        }
    }
}

/// `PORTFOLIO_CONTENT` wins over `portfolio.toml` in the working directory.
fn content_path(env_value: Option<OsString>) -> PathBuf {
    env_value
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONTENT_FILE_PATH))
}

/// Reads, parses and repairs the content document.
///
/// A missing or malformed file falls back to the bundled content; a malformed
/// file also adds its parse error to the warnings. Other read errors are
/// returned.
async fn load_content(path: &Path) -> Result<(PortfolioContent, Vec<String>), ContentError> {
    let origin = path.display().to_string();
    let parsed = match tokio::fs::read_to_string(path).await {
        Ok(source) => Some(PortfolioContent::from_toml_str(&source, &origin)),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug_log!(
                DEBUG_CONTENT,
                "'{}' not found, using {}",
                origin,
                BUNDLED_CONTENT_NAME
            );
            None
        }
        Err(error) => {
            return Err(ContentError::Read {
                path: origin,
                message: error.to_string(),
            });
        }
    };

    let mut warnings = Vec::new();
    let (mut content, origin) = match parsed {
        Some(Ok(content)) => (content, origin),
        Some(Err(error)) => {
            eprintln!("{}; using {}", error, BUNDLED_CONTENT_NAME);
            warnings.push(error.to_string());
            (bundled_content()?, BUNDLED_CONTENT_NAME.to_string())
        }
        None => (bundled_content()?, BUNDLED_CONTENT_NAME.to_string()),
    };

    warnings.extend(content.validate_and_fix());
    debug_log!(
        DEBUG_CONTENT,
        "Loaded {} entries from {} ({} warnings)",
        content.entries.len(),
        origin,
        warnings.len()
    );
    Ok((content, warnings))
}

fn bundled_content() -> Result<PortfolioContent, ContentError> {
    PortfolioContent::from_toml_str(BUNDLED_CONTENT, BUNDLED_CONTENT_NAME)
}

async fn send_down_msg(msg: DownMsg, session_id: SessionId, cor_id: CorId) {
    if let Some(session) = sessions::by_session_id().wait_for(session_id).await {
        session.send_down_msg(&msg, cor_id).await;
    }
}

#[moon::main]
async fn main() -> std::io::Result<()> {
    // Set panic hook to log all panics
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("BACKEND PANIC: {:?}", panic_info);
    }));

    start(frontend, up_msg_handler, |_error| {}).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Accent;

    fn temp_content_file(name: &str, source: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "portfolio-backend-test-{}-{}.toml",
            std::process::id(),
            name
        ));
        std::fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn bundled_content_is_valid() {
        let mut content =
            PortfolioContent::from_toml_str(BUNDLED_CONTENT, BUNDLED_CONTENT_NAME).unwrap();
        let warnings = content.validate_and_fix();

        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
        assert_eq!(content.entries.len(), 9);
        let special: Vec<u32> = content
            .entries
            .iter()
            .filter(|entry| entry.special)
            .map(|entry| entry.id)
            .collect();
        assert_eq!(special, [4, 7]);
        assert_eq!(content.segments.highlights.len(), 2);
        assert_eq!(content.segments.highlights[0].accent, Accent::Purple);
        assert_eq!(content.segments.highlights[1].accent, Accent::Blue);
        assert!(!content.segments.looking_for.is_empty());
        assert!(!content.segments.what_you_get.is_empty());
    }

    #[test]
    fn env_path_overrides_default_file() {
        assert_eq!(
            content_path(Some(OsString::from("/srv/content.toml"))),
            PathBuf::from("/srv/content.toml")
        );
        assert_eq!(content_path(None), PathBuf::from(CONTENT_FILE_PATH));
        assert_eq!(
            content_path(Some(OsString::new())),
            PathBuf::from(CONTENT_FILE_PATH)
        );
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_bundled_content() {
        let path = std::env::temp_dir().join("portfolio-backend-test-does-not-exist.toml");
        let (content, warnings) = load_content(&path).await.unwrap();

        assert!(warnings.is_empty());
        assert_eq!(content.entries.len(), 9);
    }

    #[tokio::test]
    async fn content_file_is_loaded_and_repaired() {
        let path = temp_content_file(
            "duplicates",
            r#"
[profile]
name = "Test"

[[entries]]
id = 1
role = "First"
period = "2020"

[[entries]]
id = 1
role = "Second"
period = "2021"
"#,
        );

        let (content, warnings) = load_content(&path).await.unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(content.profile.name, "Test");
        assert_eq!(content.entries.len(), 1);
        assert_eq!(content.entries[0].role, "First");
        assert_eq!(
            warnings,
            [ContentError::DuplicateEntryId(1).to_string()]
        );
    }

    #[tokio::test]
    async fn malformed_file_falls_back_to_bundled_content() {
        let path = temp_content_file("malformed", "entries = [ not toml");

        let result = load_content(&path).await;
        let _ = std::fs::remove_file(&path);

        let (content, warnings) = result.unwrap();
        assert_eq!(content.entries.len(), 9);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with(&format!(
            "failed to parse portfolio content '{}'",
            path.display()
        )));
    }
}
