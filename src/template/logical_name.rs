const DEFAULT_LOGICAL_NAME: &str = "DynamoDBTable";
const MAX_LOGICAL_NAME_LEN: usize = 255;

/// Derives a CloudFormation logical resource name from a table name.
///
/// `user-events_v2` becomes `UserEventsV2`, `2024_orders` becomes
/// `T2024Orders`. Each part is capitalized with the rest lowercased, so
/// `BalanceHistory` becomes `Balancehistory`.
pub fn logical_name(table_name: &str) -> String {
    if table_name.is_empty() {
        return DEFAULT_LOGICAL_NAME.into();
    }

    let mut cleaned: String = table_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if !cleaned.starts_with(char::is_alphabetic) {
        cleaned.insert_str(0, "T_");
    }

    let name: String = cleaned
        .split('_')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect();
    name.chars().take(MAX_LOGICAL_NAME_LEN).collect()
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
