use std::convert::Infallible;
use std::str::FromStr;

#[derive(Debug, PartialEq)]
pub enum UserRequest {
    /// Replace the dashboard input with typed text.
    Input(String),
    Save,
    Search,
    SaveResult,
    Show,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl FromStr for UserRequest {
    type Err = Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let request = match line.trim() {
            "/save" => Self::Save,
            "/search" => Self::Search,
            "/keep" => Self::SaveResult,
            "/show" => Self::Show,
            "/clear" => Self::Clear,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            command if command.starts_with('/') && !command.contains(char::is_whitespace) => {
                Self::Unknown(command.to_string())
            }
            _ => Self::Input(line.to_string()),
        };
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::UserRequest;

    fn parse(line: &str) -> UserRequest {
        line.parse().expect("parsing is infallible")
    }

    #[test]
    fn commands() {
        assert_eq!(parse("/save"), UserRequest::Save);
        assert_eq!(parse(" /search "), UserRequest::Search);
        assert_eq!(parse("/keep"), UserRequest::SaveResult);
        assert_eq!(parse("/show"), UserRequest::Show);
        assert_eq!(parse("/clear"), UserRequest::Clear);
        assert_eq!(parse("/help"), UserRequest::Help);
        assert_eq!(parse("/quit"), UserRequest::Quit);
        assert_eq!(parse("/exit"), UserRequest::Quit);
        assert_eq!(parse("/bogus"), UserRequest::Unknown("/bogus".to_string()));
    }

    #[test]
    fn text_is_kept_verbatim() {
        assert_eq!(
            parse("Buy milk and eggs "),
            UserRequest::Input("Buy milk and eggs ".to_string())
        );
        assert_eq!(
            parse("/usr/bin is a path"),
            UserRequest::Input("/usr/bin is a path".to_string())
        );
    }
}
