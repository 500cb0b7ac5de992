//! Line-oriented chat loop: the terminal stand-in for the presentation layer.
//!
//! Reads one message per line, hands it to the controller, and prints the
//! new exchange, the caution notice, or the error. While no API key is held
//! the loop asks for one instead of a message.

use std::io::Write;

use kokoro_ai::{ChatController, Credentials, Session};
use tokio::io::{AsyncBufRead, Lines};
use tracing::debug;

use crate::display;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command<'a> {
    Blank,
    Quit,
    History,
    /// `/key <token>` replaces the key; a bare `/key` forgets it.
    Key(&'a str),
    /// The line exactly as typed.
    Message(&'a str),
}

pub(crate) fn parse_line(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" => Command::Blank,
        "/quit" | "/exit" => Command::Quit,
        "/history" => Command::History,
        "/key" => Command::Key(""),
        _ => match trimmed.strip_prefix("/key ") {
            Some(token) => Command::Key(token.trim()),
            None => Command::Message(line),
        },
    }
}

/// Outcome of one key prompt.
#[derive(Debug)]
pub(crate) enum KeyInput {
    Entered(Credentials),
    Skipped,
    Closed,
}

/// Key from the environment, if set to something non-blank.
pub(crate) fn env_credentials(env_key: Option<String>) -> Option<Credentials> {
    let key = env_key.map(Credentials::new).filter(|c| !c.is_blank());
    if key.is_some() {
        debug!("using API key from environment");
    }
    key
}

/// Ask for the key on one line. The key is only kept in memory.
pub(crate) async fn prompt_key<R, W>(lines: &mut Lines<R>, out: &mut W) -> std::io::Result<KeyInput>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", display::API_KEY_HELP)?;
    write!(out, "{}", display::API_KEY_PROMPT)?;
    out.flush()?;

    let Some(line) = lines.next_line().await? else {
        return Ok(KeyInput::Closed);
    };
    if parse_line(&line) == Command::Quit {
        return Ok(KeyInput::Closed);
    }

    let key = Credentials::new(line.trim());
    if key.is_blank() {
        writeln!(out, "{}", display::MISSING_KEY)?;
        return Ok(KeyInput::Skipped);
    }
    Ok(KeyInput::Entered(key))
}

/// Run turn-cycles until `/quit` or end of input.
pub(crate) async fn run<R, W>(
    controller: &ChatController,
    session: &mut Session,
    mut credentials: Option<Credentials>,
    lines: &mut Lines<R>,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        let Some(key) = credentials.as_ref() else {
            match prompt_key(lines, out).await? {
                KeyInput::Entered(key) => {
                    credentials = Some(key);
                    writeln!(out, "{}", display::INPUT_PROMPT)?;
                }
                KeyInput::Skipped => {}
                KeyInput::Closed => break,
            }
            continue;
        };

        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Command::Blank => continue,
            Command::Quit => break,
            Command::History => print_history(session, out)?,
            Command::Key(token) => {
                credentials = Some(Credentials::new(token)).filter(|c| !c.is_blank());
                if credentials.is_some() {
                    writeln!(out, "{}", display::KEY_UPDATED)?;
                }
            }
            Command::Message(text) => {
                match controller.submit_turn(session, text, Some(key)).await {
                    Ok(outcome) => {
                        let start = outcome.history.len().saturating_sub(2);
                        for turn in &outcome.history[start..] {
                            writeln!(out, "{}", display::format_turn(turn))?;
                        }
                        if outcome.risk_flagged {
                            writeln!(out, "{}", display::CAUTION)?;
                        }
                    }
                    Err(e) => writeln!(out, "{}", display::format_error(&e))?,
                }
            }
        }
    }
    Ok(())
}

fn print_history<W: Write>(session: &Session, out: &mut W) -> std::io::Result<()> {
    if session.is_empty() {
        return Ok(());
    }
    writeln!(out, "### {}", display::HISTORY_HEADER)?;
    for turn in session.history() {
        writeln!(out, "{}", display::format_turn(turn))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use kokoro_ai::{AiError, ModelClient, RiskDetector, Turn};
    use tokio::io::AsyncBufReadExt;

    use super::*;

    /// Replies with a fixed text, or fails with a transport error when empty.
    /// Records every message it receives.
    struct FixedClient {
        reply: &'static str,
        seen: std::sync::Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ModelClient for FixedClient {
        async fn send(
            &self,
            _history: &[Turn],
            new_user_text: &str,
            credentials: &Credentials,
        ) -> Result<String, AiError> {
            self.seen
                .lock()
                .unwrap()
                .push((new_user_text.to_string(), credentials.token().to_string()));
            if self.reply.is_empty() {
                Err(AiError::Transport("connection refused".into()))
            } else {
                Ok(self.reply.to_string())
            }
        }
    }

    struct Run {
        session: Session,
        out: String,
        seen: Vec<(String, String)>,
    }

    async fn drive(reply: &'static str, credentials: Option<Credentials>, input: &'static str) -> Run {
        let client = Arc::new(FixedClient {
            reply,
            seen: Default::default(),
        });
        let ctl = ChatController::new(client.clone(), Arc::new(RiskDetector::default()));
        let mut session = Session::new();
        let mut lines = input.as_bytes().lines();
        let mut out = Vec::new();
        run(&ctl, &mut session, credentials, &mut lines, &mut out)
            .await
            .unwrap();
        let seen = client.seen.lock().unwrap().clone();
        Run {
            session,
            out: String::from_utf8(out).unwrap(),
            seen,
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("   "), Command::Blank);
        assert_eq!(parse_line("/quit"), Command::Quit);
        assert_eq!(parse_line("/history"), Command::History);
        assert_eq!(parse_line("/key  abc "), Command::Key("abc"));
        assert_eq!(parse_line("/key"), Command::Key(""));
    }

    #[test]
    fn messages_keep_surrounding_whitespace() {
        assert_eq!(parse_line(" 最近眠れない "), Command::Message(" 最近眠れない "));
    }

    #[tokio::test]
    async fn prints_exchange() {
        let run = drive("それは大変ですね", Some(Credentials::new("k")), "最近眠れない\n/quit\n").await;
        assert_eq!(run.session.len(), 2);
        assert!(run.out.contains("🧍 あなた：最近眠れない"));
        assert!(run.out.contains("🤖 ボット：それは大変ですね"));
        assert!(!run.out.contains(display::CAUTION));
    }

    #[tokio::test]
    async fn message_is_submitted_as_typed() {
        let run = drive("ok", Some(Credentials::new("k")), "  眠れない  \n").await;
        assert_eq!(run.session.history()[0].content(), "  眠れない  ");
        assert_eq!(run.seen[0].0, "  眠れない  ");
    }

    #[tokio::test]
    async fn prints_caution_on_risk() {
        let run = drive("大丈夫ですか", Some(Credentials::new("k")), "もう限界です\n").await;
        assert!(run.out.contains(display::CAUTION));
    }

    #[tokio::test]
    async fn skipped_key_is_reported_without_mutation() {
        let run = drive("unused", None, "\n").await;
        assert!(run.session.is_empty());
        assert!(run.out.contains(display::MISSING_KEY));
        assert!(run.seen.is_empty());
    }

    #[tokio::test]
    async fn key_can_be_supplied_after_skipping() {
        let run = drive("こんにちは", None, "\nmy-real-key\nhello\nhello again\n").await;
        assert_eq!(run.session.len(), 4);
        assert_eq!(run.out.matches(display::MISSING_KEY).count(), 1);
        assert_eq!(run.seen.len(), 2);
        assert!(run.seen.iter().all(|(_, key)| key == "my-real-key"));
    }

    #[tokio::test]
    async fn quit_at_key_prompt_ends_loop() {
        let run = drive("unused", None, "/quit\nhello\n").await;
        assert!(run.session.is_empty());
        assert!(run.seen.is_empty());
    }

    #[tokio::test]
    async fn key_command_replaces_credentials() {
        let run = drive("ok", Some(Credentials::new("old")), "one\n/key new\ntwo\n").await;
        assert_eq!(run.seen[0].1, "old");
        assert_eq!(run.seen[1].1, "new");
        assert!(run.out.contains(display::KEY_UPDATED));
    }

    #[tokio::test]
    async fn bare_key_command_asks_again() {
        let run = drive("ok", Some(Credentials::new("old")), "/key\nfresh\nhello\n").await;
        assert_eq!(run.seen, vec![("hello".to_string(), "fresh".to_string())]);
    }

    #[tokio::test]
    async fn errors_are_printed_and_loop_continues() {
        let run = drive("", Some(Credentials::new("k")), "one\ntwo\n/history\n").await;
        assert_eq!(run.session.len(), 2);
        assert_eq!(run.out.matches("エラーが発生しました").count(), 2);
        assert!(run.out.contains(display::HISTORY_HEADER));
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let run = drive("ok", Some(Credentials::new("k")), "\n   \n").await;
        assert!(run.session.is_empty());
    }

    #[test]
    fn environment_key_is_used_when_present() {
        let creds = env_credentials(Some("env-key".into())).unwrap();
        assert_eq!(creds.token(), "env-key");
        assert!(env_credentials(Some("   ".into())).is_none());
        assert!(env_credentials(None).is_none());
    }

    #[tokio::test]
    async fn prompt_trims_entered_key() {
        let mut lines = "  typed-key \n".as_bytes().lines();
        let mut out = Vec::new();
        match prompt_key(&mut lines, &mut out).await.unwrap() {
            KeyInput::Entered(creds) => assert_eq!(creds.token(), "typed-key"),
            other => panic!("expected a key, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn prompt_reports_end_of_input() {
        let mut lines = "".as_bytes().lines();
        let mut out = Vec::new();
        assert!(matches!(
            prompt_key(&mut lines, &mut out).await.unwrap(),
            KeyInput::Closed
        ));
    }
}
