use crate::error::SampleResult;
use azrest::secrets::EncryptedSecret;

/// TOML snippet holding `secret` sealed with `password`, ready to paste
/// under the matching `encrypted_*` key.
pub fn run(secret: &str, password: &str) -> SampleResult<String> {
    let sealed = EncryptedSecret::seal(secret, password)?;
    Ok(format!(
        "{{ value = \"{}\", salt = \"{}\" }}",
        sealed.value, sealed.salt
    ))
}
