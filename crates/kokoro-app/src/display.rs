//! Fixed UI text and transcript formatting for the terminal front end.

use kokoro_ai::{Role, Turn};

pub const TITLE: &str = "🧠 うつ改善カウンセリングチャット";
pub const INTRO: &str = "気持ちや悩みを自由に入力してください。ボットが優しく対話します。";
pub const USAGE: &str = "(/history で履歴を表示、/key でAPIキーを再設定、/quit で終了)";
pub const INPUT_PROMPT: &str = "✍️ 今の気持ちを書いてみてください";

pub const API_KEY_PROMPT: &str = "🔐 Gemini APIキーを入力してください（このセッション中のみ保持されます）: ";
pub const API_KEY_HELP: &str = "🔑 APIキーの取得: https://makersuite.google.com/app/apikey";
pub const MISSING_KEY: &str =
    "❌ Gemini APIキーを入力してください。環境変数 GEMINI_API_KEY でも指定できます。";

pub const KEY_UPDATED: &str = "🔑 APIキーを更新しました。";

pub const CAUTION: &str = "⚠️ 深刻なサインが検出されました。必要に応じて専門機関へご相談ください。";
pub const DISCLAIMER: &str = "📌 このアプリは医療行為を目的としたものではありません。深刻な症状がある場合は、精神科や専門機関にご相談ください。";
pub const HISTORY_HEADER: &str = "💬 チャット履歴";

pub fn speaker_label(role: Role) -> &'static str {
    match role {
        Role::User => "🧍 あなた",
        Role::Model => "🤖 ボット",
    }
}

pub fn format_turn(turn: &Turn) -> String {
    format!("{}：{}", speaker_label(turn.role()), turn.content())
}

pub fn format_error(err: impl std::fmt::Display) -> String {
    format!("エラーが発生しました: {err}")
}
