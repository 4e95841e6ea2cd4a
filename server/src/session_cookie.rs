use base64::prelude::*;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use types::{Error, Result, UserSession, decode_session, encode_session, err};

type HmacSha256 = Hmac<Sha256>;

/// Encode and sign a session as `payload.signature`.
pub fn seal(session: &UserSession, secret: &SecretString) -> Result<String> {
    let payload = encode_session(session)?;
    let signature = BASE64_URL_SAFE_NO_PAD.encode(mac(secret, &payload)?.finalize().into_bytes());

    Ok(format!("{payload}.{signature}"))
}

/// Verify a sealed session and decode it.
pub fn open(token: &str, secret: &SecretString) -> Result<UserSession> {
    let (payload, signature) = token
        .split_once('.')
        .ok_or_else(|| Error::unauthorized("invalid session format"))?;

    let signature = BASE64_URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| Error::unauthorized("invalid session signature"))?;

    mac(secret, payload)?
        .verify_slice(&signature)
        .map_err(|_| Error::unauthorized("invalid session signature"))?;

    decode_session(payload)
}

fn mac(secret: &SecretString, payload: &str) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| err!("invalid session secret"))?;
    mac.update(payload.as_bytes());
    Ok(mac)
}
