use courier_core::Msg;

/// One line typed by the user, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppInput {
    Msg(Msg),
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Type to search (at least 2 characters); each line is one edit of the search box.
  /d N, /download N   download result N
  /help               show this help
  /q, /quit           exit";

pub fn parse_line(line: &str) -> AppInput {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return AppInput::Msg(Msg::InputChanged(line.to_string()));
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let argument = parts.next();
    match (command, argument, parts.next()) {
        ("/q" | "/quit", None, None) => AppInput::Quit,
        ("/help" | "/h", None, None) => AppInput::Help,
        ("/d" | "/download", Some(number), None) => match number.parse::<usize>() {
            Ok(number) if number > 0 => AppInput::Msg(Msg::DownloadClicked { index: number - 1 }),
            _ => AppInput::Unknown(trimmed.to_string()),
        },
        _ => AppInput::Unknown(trimmed.to_string()),
    }
}
