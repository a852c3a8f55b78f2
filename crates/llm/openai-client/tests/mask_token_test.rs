//! Tests for [`openai_client::mask_token`]: API keys are logged as head(7) + `***` + tail(4),
//! short keys are fully masked.

use openai_client::mask_token;

/// **Test: Keys of 11 characters or fewer never leak a segment.**
#[test]
fn short_keys_are_fully_masked() {
    for key in ["", "a", "sk-12345", "sk-proj-123"] {
        assert_eq!(mask_token(key), "***", "key {:?}", key);
    }
}

/// **Test: Longer keys keep the first 7 and last 4 characters.**
#[test]
fn long_keys_show_head_and_tail() {
    assert_eq!(mask_token("sk-proj-abcdefghijklmnop"), "sk-proj***mnop");
    assert_eq!(mask_token("sk-proj-xyzw"), "sk-proj***xyzw");
}

/// **Test: Multi-byte characters are counted as characters, not bytes.**
#[test]
fn multibyte_keys_do_not_split_characters() {
    let masked = mask_token("ключ-секретный-токен");
    assert!(masked.starts_with("ключ-се"));
    assert!(masked.ends_with("окен"));
}
