//! Masking helpers so contact identifiers never reach logs in full

/// Mask a phone number, keeping only the last 4 digits
///
/// ```
/// use pp_shared::utils::masking::mask_phone_number;
/// assert_eq!(mask_phone_number("+1234567890"), "+******7890");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible_digits = 4;
    let masked_count = chars.len() - visible_digits;
    let last_digits: String = chars[chars.len() - visible_digits..].iter().collect();

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}

/// Mask the local part of an email address, keeping its first character
///
/// ```
/// use pp_shared::utils::masking::mask_email;
/// assert_eq!(mask_email("user@example.com"), "u***@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

/// Mask any contact identifier (email address or phone number)
pub fn mask_contact(contact: &str) -> String {
    if contact.contains('@') {
        mask_email(contact)
    } else {
        mask_phone_number(contact)
    }
}
