pub fn render_welcome(name: &str, organization_name: &str, base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Welcome to OrgHub</h2>
    <p>Hi {name},</p>
    <p>An admin account has been created for you to manage <strong>{organization_name}</strong>.</p>
    <p>Profile changes you submit will be reviewed before going live.</p>
    <p><a href="{base_url}" style="display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;">Log In</a></p>
    <p style="color: #666; font-size: 14px;">If you didn't expect this email, you can ignore it.</p>
</body>
</html>"#
    )
}

pub fn render_password_changed(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Password Changed</h2>
    <p>Hi {name},</p>
    <p>The password on your OrgHub admin account was just changed.</p>
    <p style="color: #666; font-size: 14px;">If this wasn't you, contact your superadmin immediately.</p>
</body>
</html>"#
    )
}
