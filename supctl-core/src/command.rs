//! Argument vectors for supervisorctl invocations.

use std::path::Path;
use supctl_error::Action;

/// State-changing subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Start,
    Stop,
    Restart,
}

impl From<ControlAction> for Action {
    fn from(action: ControlAction) -> Self {
        match action {
            ControlAction::Start => Action::Start,
            ControlAction::Stop => Action::Stop,
            ControlAction::Restart => Action::Restart,
        }
    }
}

impl ControlAction {
    pub fn as_str(self) -> &'static str {
        Action::from(self).as_str()
    }
}

/// `[-c <config_file>] <subcommand> [operands...]`
pub fn build_args<S: AsRef<str>>(
    config_file: Option<&Path>,
    action: Action,
    operands: &[S],
) -> Vec<String> {
    let mut args = Vec::with_capacity(operands.len() + 3);
    if let Some(path) = config_file {
        args.push("-c".to_string());
        args.push(path.to_string_lossy().into_owned());
    }
    args.push(action.as_str().to_string());
    args.extend(operands.iter().map(|s| s.as_ref().to_string()));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_without_names() {
        let args = build_args::<&str>(None, Action::Status, &[]);
        assert_eq!(args, vec!["status"]);
    }

    #[test]
    fn status_with_names_keeps_order() {
        let args = build_args(None, Action::Status, &["program1", "program2"]);
        assert_eq!(args, vec!["status", "program1", "program2"]);
    }

    #[test]
    fn config_file_comes_first() {
        let path = Path::new("/etc/supervisor/supervisord.conf");
        let args = build_args(Some(path), ControlAction::Restart.into(), &["web"]);
        assert_eq!(
            args,
            vec!["-c", "/etc/supervisor/supervisord.conf", "restart", "web"]
        );
    }

    #[test]
    fn control_actions_map_to_subcommands() {
        assert_eq!(ControlAction::Start.as_str(), "start");
        assert_eq!(ControlAction::Stop.as_str(), "stop");
        assert_eq!(ControlAction::Restart.as_str(), "restart");
    }
}
