//! 表单校验
//!
//! 校验只在客户端进行，不合法的表单不会发出请求。

use autotest_shared::{CreateSiteRequest, LoginRequest, RegisterRequest};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+$").expect("valid url pattern"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+$").expect("valid email pattern"));

const MAX_FIELD_LEN: usize = 50;
const MIN_PASSWORD_LEN: usize = 6;

/// 字段名 -> 错误信息，每个字段只保留第一条错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    fn required(&mut self, field: &'static str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, message);
            false
        } else {
            true
        }
    }

    fn max_len(&mut self, field: &'static str, value: &str, message: &str) {
        if value.chars().count() > MAX_FIELD_LEN {
            self.add(field, message);
        }
    }
}

/// 新增站点表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteForm {
    pub title: String,
    pub url: String,
}

impl SiteForm {
    pub fn validate(&self) -> Result<CreateSiteRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.required("title", &self.title, "Title is required");
        if errors.required("url", &self.url, "URL is required")
            && !URL_PATTERN.is_match(self.url.trim())
        {
            errors.add("url", "Enter a valid URL");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateSiteRequest {
            site_title: self.title.trim().to_string(),
            site_url: self.url.trim().to_string(),
        })
    }
}

/// 登录表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.required("email", &self.email, "Email is required");
        errors.required("password", &self.password, "Password is required");

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// 注册表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        if errors.required("firstname", &self.firstname, "First name is required") {
            errors.max_len("firstname", &self.firstname, "First name must be max 50 characters");
        }
        if errors.required("lastname", &self.lastname, "Last name is required") {
            errors.max_len("lastname", &self.lastname, "Last name must be max 50 characters");
        }
        if errors.required("username", &self.username, "Username is required") {
            errors.max_len("username", &self.username, "Username must be max 50 characters");
        }
        if errors.required("email", &self.email, "Email is required") {
            if !EMAIL_PATTERN.is_match(self.email.trim()) {
                errors.add("email", "Invalid email address");
            }
            errors.max_len("email", &self.email, "Email must be max 50 characters");
        }
        if errors.required("password", &self.password, "Password is required") {
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.add("password", "Password must be at least 6 characters");
            }
            errors.max_len("password", &self.password, "Password must be max 50 characters");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegisterRequest {
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_form_accepts_http_urls() {
        let form = SiteForm {
            title: " Example ".to_string(),
            url: "https://example.com".to_string(),
        };
        let req = form.validate().unwrap();
        assert_eq!(req.site_title, "Example");
        assert_eq!(req.site_url, "https://example.com");
    }

    #[test]
    fn test_site_form_errors() {
        let errors = SiteForm::default().validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("url"), Some("URL is required"));

        let errors = SiteForm {
            title: "Example".to_string(),
            url: "ftp://example.com".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("url"), Some("Enter a valid URL"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm {
            email: "ann@example.com".to_string(),
            password: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("email"), None);
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_register_rules() {
        let valid = RegisterForm {
            firstname: "Ann".to_string(),
            lastname: "Lee".to_string(),
            username: "ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let errors = RegisterForm {
            firstname: "x".repeat(51),
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            ..valid.clone()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("firstname"), Some("First name must be max 50 characters"));
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get("username"), None);
    }
}
