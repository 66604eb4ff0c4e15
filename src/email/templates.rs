pub const PASSWORD_RESET_SUBJECT: &str = "Password Reset";

pub fn reset_url(base_url: &str, token: &str) -> String {
    format!("{base_url}/reset-password/{token}")
}

pub fn render_password_reset(reset_url: &str) -> String {
    format!(
        "Please click on the following link, or paste this into your browser to reset your password:\n\n\
         {reset_url}\n\n\
         If you did not request this, please ignore this email and your password will remain unchanged.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_embeds_link() {
        let url = reset_url("https://example.com", "abc123");
        assert_eq!(url, "https://example.com/reset-password/abc123");

        let body = render_password_reset(&url);
        assert!(body.contains("\n\nhttps://example.com/reset-password/abc123\n\n"));
        assert!(body.ends_with("remain unchanged.\n"));
    }
}
