//! Path-based navigation targets.

use std::fmt;

use crate::domain::entities::{ActivityId, NewsId};

/// A screen the app can show, addressed by a browser-style path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    /// `/`
    #[default]
    Home,
    /// `/login`
    Login,
    /// `/create-activity`
    CreateActivity,
    /// `/activity/:id`
    ActivityDetail(ActivityId),
    /// `/edit-activity/:id`
    EditActivity(ActivityId),
    /// `/activity/:id/news/new`
    CreateNews(ActivityId),
    /// `/news/:id/edit`
    EditNews(NewsId),
}

impl Route {
    /// Resolves a path. Query strings, fragments and trailing slashes are
    /// ignored; anything unrecognised resolves to [`Route::Home`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Self::Login,
            ["create-activity"] => Self::CreateActivity,
            ["activity", id] => Self::ActivityDetail(ActivityId::new(*id)),
            ["edit-activity", id] => Self::EditActivity(ActivityId::new(*id)),
            ["activity", id, "news", "new"] => Self::CreateNews(ActivityId::new(*id)),
            ["news", id, "edit"] => Self::EditNews(NewsId::new(*id)),
            _ => Self::Home,
        }
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::CreateActivity => "/create-activity".to_string(),
            Self::ActivityDetail(id) => format!("/activity/{id}"),
            Self::EditActivity(id) => format!("/edit-activity/{id}"),
            Self::CreateNews(id) => format!("/activity/{id}/news/new"),
            Self::EditNews(id) => format!("/news/{id}/edit"),
        }
    }

    /// Whether the screen sends the user to login when nobody is signed in.
    #[must_use]
    pub const fn requires_session(&self) -> bool {
        matches!(
            self,
            Self::CreateActivity | Self::EditActivity(_) | Self::CreateNews(_) | Self::EditNews(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/", Route::Home ; "root")]
    #[test_case("", Route::Home ; "empty")]
    #[test_case("/login", Route::Login ; "login")]
    #[test_case("/login/", Route::Login ; "trailing slash")]
    #[test_case("/create-activity?draft=1", Route::CreateActivity ; "query string")]
    #[test_case("/activity/42", Route::ActivityDetail(ActivityId::new("42")) ; "detail")]
    #[test_case("/activity/42#news", Route::ActivityDetail(ActivityId::new("42")) ; "fragment")]
    #[test_case("/edit-activity/abc", Route::EditActivity(ActivityId::new("abc")) ; "edit")]
    #[test_case("/activity/7/news/new", Route::CreateNews(ActivityId::new("7")) ; "create news")]
    #[test_case("/news/9/edit", Route::EditNews(NewsId::new("9")) ; "edit news")]
    #[test_case("/nope", Route::Home ; "unknown")]
    #[test_case("/activity", Route::Home ; "missing id")]
    #[test_case("/activity/1/extra", Route::Home ; "extra segment")]
    fn test_parse(path: &str, expected: Route) {
        assert_eq!(Route::parse(path), expected);
    }

    #[test]
    fn test_path_round_trips() {
        let routes = [
            Route::Home,
            Route::Login,
            Route::CreateActivity,
            Route::ActivityDetail(ActivityId::new("1")),
            Route::EditActivity(ActivityId::new("2")),
            Route::CreateNews(ActivityId::new("3")),
            Route::EditNews(NewsId::new("4")),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_requires_session() {
        assert!(Route::CreateActivity.requires_session());
        assert!(Route::EditActivity(ActivityId::new("1")).requires_session());
        assert!(!Route::Home.requires_session());
        assert!(!Route::ActivityDetail(ActivityId::new("1")).requires_session());
        assert_eq!(Route::EditNews(NewsId::new("5")).to_string(), "/news/5/edit");
    }
}
