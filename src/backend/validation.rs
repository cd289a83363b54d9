/**
 * Request Validation
 *
 * Field-level checks run by the handlers before any service call. Each
 * validator collects every failing field into one `BackendError::Validation`
 * rather than stopping at the first, and hands back the cleaned values.
 */

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::PoemChanges;
use crate::shared::validation::{
    clean_tags, normalize_email, optional_text, require_text, validate_password,
    validate_username, MAX_BIO_LEN, MAX_LOCATION_LEN, MAX_NAME_LEN,
};
use crate::shared::{
    Category, CommentRequest, CreatePoemRequest, FieldError, LoginRequest, Profile,
    RegisterRequest, SharedError, UpdatePoemRequest,
};

/// Collects field errors across several checks
#[derive(Debug, Default)]
struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    fn check<T>(&mut self, result: Result<T, SharedError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err.into());
                None
            }
        }
    }

    fn finish(self) -> Result<(), BackendError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(BackendError::invalid_fields(self.errors))
        }
    }
}

/// Parse a path id. Anything that is not a UUID cannot name a record, so
/// it is reported as missing.
pub fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw.trim()).map_err(|_| BackendError::not_found(not_found))
}

#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn validate_registration(request: RegisterRequest) -> Result<ValidRegistration, BackendError> {
    let mut checks = Checks::default();
    let username = checks.check(validate_username(&request.username));
    let email = checks.check(normalize_email(&request.email));
    checks.check(validate_password(&request.password));
    checks.finish()?;

    match (username, email) {
        (Some(username), Some(email)) => Ok(ValidRegistration {
            username,
            email,
            password: request.password,
        }),
        _ => Err(BackendError::bad_request("Validation failed")),
    }
}

/// Returns the normalized email and the password
pub fn validate_login(request: LoginRequest) -> Result<(String, String), BackendError> {
    let mut checks = Checks::default();
    let email = checks.check(normalize_email(&request.email));
    if request.password.is_empty() {
        checks.check::<()>(Err(SharedError::validation("password", "Password is required")));
    }
    checks.finish()?;

    email
        .map(|email| (email, request.password))
        .ok_or_else(|| BackendError::bad_request("Validation failed"))
}

/// Cleaned fields of a new poem. The author comes from the token.
#[derive(Debug, Clone)]
pub struct ValidPoem {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub is_published: bool,
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>, SharedError> {
    match raw.map(str::trim).filter(|c| !c.is_empty()) {
        Some(raw) => raw.parse().map(Some),
        None => Ok(None),
    }
}

fn require_content(content: &str) -> Result<String, SharedError> {
    // Content keeps its whitespace; line breaks are part of a poem
    require_text("content", content, "Content")?;
    Ok(content.to_string())
}

pub fn validate_new_poem(request: CreatePoemRequest) -> Result<ValidPoem, BackendError> {
    let mut checks = Checks::default();
    let title = checks.check(require_text("title", &request.title, "Title"));
    let content = checks.check(require_content(&request.content));
    let category = checks.check(parse_category(request.category.as_deref()));
    checks.finish()?;

    match (title, content, category) {
        (Some(title), Some(content), Some(category)) => Ok(ValidPoem {
            title,
            content,
            category: category.unwrap_or_default(),
            tags: clean_tags(request.tags),
            is_published: request.is_published.unwrap_or(true),
        }),
        _ => Err(BackendError::bad_request("Validation failed")),
    }
}

/// Only title, content, category, tags and the publication flag can be changed
pub fn validate_poem_update(request: UpdatePoemRequest) -> Result<PoemChanges, BackendError> {
    let mut checks = Checks::default();
    let title = checks.check(require_text("title", &request.title, "Title"));
    let content = checks.check(require_content(&request.content));
    let category = checks.check(parse_category(request.category.as_deref()));
    checks.finish()?;

    match (title, content, category) {
        (Some(title), Some(content), Some(category)) => Ok(PoemChanges {
            title,
            content,
            category,
            tags: request.tags.map(clean_tags),
            is_published: request.is_published,
        }),
        _ => Err(BackendError::bad_request("Validation failed")),
    }
}

pub fn validate_comment(request: CommentRequest) -> Result<String, BackendError> {
    require_text("text", &request.text, "Comment text").map_err(BackendError::from)
}

/// Trim every profile field, drop blanks and enforce length limits
pub fn validate_profile(profile: Profile) -> Result<Profile, BackendError> {
    let mut checks = Checks::default();
    let first_name = checks.check(optional_text("firstName", profile.first_name.as_deref(), MAX_NAME_LEN));
    let last_name = checks.check(optional_text("lastName", profile.last_name.as_deref(), MAX_NAME_LEN));
    let bio = checks.check(optional_text("bio", profile.bio.as_deref(), MAX_BIO_LEN));
    let location = checks.check(optional_text("location", profile.location.as_deref(), MAX_LOCATION_LEN));
    checks.finish()?;

    Ok(Profile {
        first_name: first_name.flatten(),
        last_name: last_name.flatten(),
        bio: bio.flatten(),
        location: location.flatten(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fields(err: BackendError) -> Vec<String> {
        match err {
            BackendError::Validation { errors, .. } => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_registration_collects_every_field() {
        let err = validate_registration(RegisterRequest {
            username: " a ".to_string(),
            email: "nope".to_string(),
            password: "123".to_string(),
        })
        .unwrap_err();
        assert_eq!(fields(err), vec!["username", "email", "password"]);
    }

    #[test]
    fn test_registration_normalizes() {
        let valid = validate_registration(RegisterRequest {
            username: "  hafez ".to_string(),
            email: " Hafez@Example.COM ".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap();
        assert_eq!(valid.username, "hafez");
        assert_eq!(valid.email, "hafez@example.com");
    }

    #[test]
    fn test_login_requires_password() {
        let err = validate_login(LoginRequest {
            email: "a@b.co".to_string(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(fields(err), vec!["password"]);
    }

    #[test]
    fn test_new_poem_defaults() {
        let poem = validate_new_poem(CreatePoemRequest {
            title: "  Ode  ".to_string(),
            content: "Line one\nLine two\n".to_string(),
            tags: vec![" sea ".to_string(), "".to_string()],
            ..CreatePoemRequest::default()
        })
        .unwrap();
        assert_eq!(poem.title, "Ode");
        assert_eq!(poem.content, "Line one\nLine two\n");
        assert_eq!(poem.category, Category::Other);
        assert_eq!(poem.tags, vec!["sea"]);
        assert!(poem.is_published);
    }

    #[test]
    fn test_new_poem_requires_title_and_content() {
        let err = validate_new_poem(CreatePoemRequest {
            title: "   ".to_string(),
            ..CreatePoemRequest::default()
        })
        .unwrap_err();
        assert_eq!(fields(err), vec!["title", "content"]);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = validate_new_poem(CreatePoemRequest {
            title: "t".to_string(),
            content: "c".to_string(),
            category: Some("epic".to_string()),
            ..CreatePoemRequest::default()
        })
        .unwrap_err();
        assert_eq!(fields(err), vec!["category"]);
    }

    #[test]
    fn test_update_keeps_absent_fields_absent() {
        let changes = validate_poem_update(UpdatePoemRequest {
            title: "t".to_string(),
            content: "c".to_string(),
            ..UpdatePoemRequest::default()
        })
        .unwrap();
        assert!(changes.category.is_none());
        assert!(changes.tags.is_none());
        assert!(changes.is_published.is_none());
    }

    #[test]
    fn test_comment_is_trimmed() {
        let text = validate_comment(CommentRequest { text: "  lovely  ".to_string() }).unwrap();
        assert_eq!(text, "lovely");
        assert_matches!(
            validate_comment(CommentRequest { text: " ".to_string() }),
            Err(BackendError::Validation { .. })
        );
    }

    #[test]
    fn test_profile_blank_becomes_absent() {
        let profile = validate_profile(Profile {
            first_name: Some("  ".to_string()),
            location: Some(" Shiraz ".to_string()),
            ..Profile::default()
        })
        .unwrap();
        assert_eq!(profile.first_name, None);
        assert_eq!(profile.location.as_deref(), Some("Shiraz"));
    }

    #[test]
    fn test_profile_length_limits() {
        let err = validate_profile(Profile {
            bio: Some("x".repeat(MAX_BIO_LEN + 1)),
            ..Profile::default()
        })
        .unwrap_err();
        assert_eq!(fields(err), vec!["bio"]);
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Poem not found").unwrap(), id);
        assert_matches!(parse_id("not-an-id", "Poem not found"), Err(BackendError::NotFound(_)));
    }
}
