use rand::Rng;

const HEX_CHARS: &[u8] = b"0123456789abcdef";

fn random_hex(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char)
        .collect()
}

/// Restaurant ids are short and human-quotable, e.g. "RID_1a2b3c4d".
pub fn generate_restaurant_id() -> String {
    format!("RID_{}", random_hex(8))
}

/// Capability credential minted once at registration, e.g. "KEY_0f1e2d3c4b5a".
pub fn generate_api_key() -> String {
    format!("KEY_{}", random_hex(12))
}

pub fn generate_offer_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
