use serde::Serialize;

use crate::status::Status;

/// Filename used when the user gave none; matches any marker of a kind.
pub const ANY_FILENAME: &str = "*";

#[derive(Clone, Copy, Debug, Serialize, Eq, PartialEq)]
pub enum MarkerKind {
    Deployed,
    Deploying,
    Failed,
}

impl MarkerKind {
    /// Resolution order, first match wins.
    pub const PRIORITY: [MarkerKind; 3] =
        [MarkerKind::Deployed, MarkerKind::Deploying, MarkerKind::Failed];

    pub fn suffix(&self) -> &'static str {
        match self {
            MarkerKind::Deployed => "deployed",
            MarkerKind::Deploying => "isdeploying",
            MarkerKind::Failed => "failed",
        }
    }

    pub fn status(&self) -> Status {
        match self {
            MarkerKind::Deployed => Status::Deployed,
            MarkerKind::Deploying => Status::Deploying,
            MarkerKind::Failed => Status::Failed,
        }
    }
}

/// `{filename}.{suffix}` in glob syntax: `*`, `?`, `[...]`, `[!...]` and
/// `{a,b}` work as usual, everything else is literal.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    glob: String,
}

impl MarkerPattern {
    pub fn new(filename: &str, kind: MarkerKind) -> Self {
        let filename = match filename.trim() {
            "" => ANY_FILENAME,
            f => f,
        };

        Self {
            glob: format!("{filename}.{}", kind.suffix()),
        }
    }

    pub fn glob(&self) -> &str {
        &self.glob
    }

    pub fn matches(&self, file_name: &str) -> bool {
        glob_match::glob_match(&self.glob, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(filename: &str, kind: MarkerKind) -> MarkerPattern {
        MarkerPattern::new(filename, kind)
    }

    #[test]
    fn literal_filename_matches_exactly() {
        let p = pattern("app.war", MarkerKind::Deployed);
        assert!(p.matches("app.war.deployed"));
        assert!(!p.matches("app.war.isdeploying"));
        assert!(!p.matches("xapp.war.deployed"));
        assert!(!p.matches("app.war.deployed.bak"));
        assert!(!p.matches("appXwar.deployed"));
    }

    #[test]
    fn empty_filename_matches_any_marker() {
        let p = pattern("  ", MarkerKind::Deploying);
        assert!(p.matches("service.ear.isdeploying"));
        assert!(p.matches(".isdeploying"));
        assert!(!p.matches("service.ear.deployed"));
    }

    #[test]
    fn wildcards_follow_glob_rules() {
        let p = pattern("app-*.war", MarkerKind::Failed);
        assert!(p.matches("app-1.2.war.failed"));
        assert!(!p.matches("app.war.failed"));

        let p = pattern("app?.war", MarkerKind::Deployed);
        assert!(p.matches("app1.war.deployed"));
        assert!(!p.matches("app12.war.deployed"));
    }

    #[test]
    fn character_classes() {
        let p = pattern("app[12]", MarkerKind::Deployed);
        assert!(p.matches("app1.deployed"));
        assert!(!p.matches("app3.deployed"));

        let p = pattern("app[!12]", MarkerKind::Deployed);
        assert!(p.matches("app3.deployed"));
        assert!(!p.matches("app1.deployed"));
    }

    #[test]
    fn alternatives() {
        let p = pattern("{api,web}.war", MarkerKind::Deploying);
        assert!(p.matches("api.war.isdeploying"));
        assert!(p.matches("web.war.isdeploying"));
        assert!(!p.matches("batch.war.isdeploying"));
    }

    #[test]
    fn priority_order_is_fixed() {
        let statuses: Vec<Status> = MarkerKind::PRIORITY.iter().map(|k| k.status()).collect();
        assert_eq!(
            statuses,
            vec![Status::Deployed, Status::Deploying, Status::Failed]
        );
    }
}
