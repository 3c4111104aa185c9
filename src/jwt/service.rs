use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;

use super::{Identity, IdentityClaims, JwtConfig, TokenDomain};
use crate::crypto::{TOKEN_ID_LENGTH, generate_token};
use crate::{AuthError, SecretString};

/// Algorithm every token is signed with.
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Symmetric MAC family accepted at validation.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// A freshly minted access/refresh pair for one identity.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

#[derive(Clone)]
struct DomainKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl DomainKeys {
    fn from_secret(secret: &SecretString) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        }
    }
}

/// The only header field inspected before signature verification.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Issues and validates tokens in both signing domains.
///
/// Holds only immutable key material; clone freely across request handlers.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    access: DomainKeys,
    refresh: DomainKeys,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let access = DomainKeys::from_secret(&config.access_secret);
        let refresh = DomainKeys::from_secret(&config.refresh_secret);

        Self {
            config,
            access,
            refresh,
        }
    }

    fn keys(&self, domain: TokenDomain) -> &DomainKeys {
        match domain {
            TokenDomain::Access => &self.access,
            TokenDomain::Refresh => &self.refresh,
        }
    }

    /// Mints a new access/refresh pair for `identity`, both stamped with the
    /// same `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::IssuanceFailure` if either token cannot be signed.
    /// No partial pair is ever returned.
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, AuthError> {
        let now = Utc::now();

        let access_claims = self.claims_for(identity, TokenDomain::Access, now);
        let refresh_claims = self.claims_for(identity, TokenDomain::Refresh, now);

        let access_token = self.sign(&access_claims)?;
        let refresh_token = self.sign(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at: now + self.config.access_expiry(),
            refresh_expires_at: now + self.config.refresh_expiry(),
        })
    }

    fn claims_for(
        &self,
        identity: &Identity,
        domain: TokenDomain,
        now: DateTime<Utc>,
    ) -> IdentityClaims {
        IdentityClaims {
            sub: identity.subject_id.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role,
            iss: self.config.issuer().to_owned(),
            iat: now.timestamp(),
            exp: (now + self.config.expiry(domain)).timestamp(),
            jti: generate_token(TOKEN_ID_LENGTH),
            domain,
        }
    }

    /// Signs `claims` with the secret of `claims.domain`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::IssuanceFailure` if encoding fails.
    pub fn sign(&self, claims: &IdentityClaims) -> Result<SecretString, AuthError> {
        let header = Header::new(SIGNING_ALGORITHM);

        jsonwebtoken::encode(&header, claims, &self.keys(claims.domain).encoding)
            .map(SecretString::from)
            .map_err(|e| AuthError::IssuanceFailure(e.to_string()))
    }

    /// Validates `token` against the secret of `domain` and returns its
    /// claims unmodified.
    ///
    /// Checks run in order: structure, algorithm, signature, claims, expiry,
    /// and finally the asserted `typ`. The algorithm is read from the header
    /// before the MAC is checked, so a `none` or RSA token whose MAC is also
    /// wrong reports `UnexpectedAlgorithm` rather than `BadSignature`.
    /// Performs no store lookups.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` if the token cannot be parsed or is missing claims
    /// - `UnexpectedAlgorithm` if the header asserts anything outside HMAC
    /// - `BadSignature` if the MAC does not match the domain secret
    /// - `Expired` if `exp <= now`
    /// - `WrongTokenDomain` if the signed `typ` names the other domain
    pub fn validate(&self, token: &str, domain: TokenDomain) -> Result<IdentityClaims, AuthError> {
        check_header(token)?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.set_issuer(&[self.config.issuer()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = jsonwebtoken::decode::<IdentityClaims>(
            token,
            &self.keys(domain).decoding,
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => AuthError::BadSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnexpectedAlgorithm
            }
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::MalformedToken,
        })?;

        let claims = data.claims;

        // the library tolerates exp == now; a token is live strictly before exp
        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        if claims.domain != domain {
            return Err(AuthError::WrongTokenDomain);
        }

        Ok(claims)
    }

    pub fn access_expiry(&self) -> Duration {
        self.config.access_expiry()
    }

    pub fn refresh_expiry(&self) -> Duration {
        self.config.refresh_expiry()
    }

    pub fn issuer(&self) -> &str {
        self.config.issuer()
    }
}

/// Rejects tokens that are structurally broken or assert a non-HMAC
/// algorithm (including `none`) before any key is touched.
fn check_header(token: &str) -> Result<(), AuthError> {
    let mut parts = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AuthError::MalformedToken);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::MalformedToken)?;
    let raw: RawHeader = serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)?;

    if !matches!(raw.alg.as_str(), "HS256" | "HS384" | "HS512") {
        return Err(AuthError::UnexpectedAlgorithm);
    }

    Ok(())
}
