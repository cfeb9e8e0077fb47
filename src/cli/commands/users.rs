use crate::config::demo_users;

/// Prints the built-in accounts so they can be used on the login page.
pub fn list_users() {
    println!("{:<32} {:<10} {}", "E-MAIL", "ROLE", "NAME");
    for user in demo_users() {
        println!(
            "{:<32} {:<10} {}",
            user.email,
            user.role.label(),
            user.display_name()
        );
    }
}
