//! Reading notation lines back into values
//!
//! Used for documentation checks and tooling; records themselves are always
//! persisted as JSON.

use parley_domain::claim::parse_ordinal;
use parley_domain::symbols::value_for;
use parley_domain::{
    ArgumentLink, Attitude, Claim, ClaimType, Confidence, Evidence, EvidenceCitation,
    EvidenceSource, EvidenceStrength, RegistryError, RelationType, Symbolic,
};

use crate::compact::{COMMENT, CONJUNCTION, FREEFORM_MARK, TURNSTILE};
use crate::error::NotationError;

/// A claim line split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedClaimLine {
    /// Leading marker (`①`, `(21)` or an explicit id)
    pub marker: String,
    /// Role tag without the guillemets
    pub role: Option<String>,
    /// Confidence
    pub confidence: Confidence,
    /// Attitude
    pub attitude: Attitude,
    /// Claim type
    pub claim_type: ClaimType,
    /// Unescaped claim text
    pub claim_text: String,
    /// Evidence after the turnstile, empty when there is none
    pub evidence: Evidence,
}

impl ParsedClaimLine {
    /// 1-based position when the marker is an ordinal
    pub fn position(&self) -> Option<usize> {
        parse_ordinal(&self.marker)
    }

    /// Convert into a claim
    ///
    /// Ordinal markers are positional and do not become a `claim_id`.
    pub fn into_claim(self) -> Claim {
        let claim_id = match self.position() {
            Some(_) => None,
            None => Some(self.marker),
        };
        Claim {
            claim_id,
            role: self.role,
            claim_text: self.claim_text,
            confidence: self.confidence,
            attitude: self.attitude,
            claim_type: self.claim_type,
            evidence: self.evidence,
        }
    }
}

fn lookup<T: Symbolic>(glyph: &str) -> Result<T, NotationError> {
    let value = value_for(T::FAMILY, glyph)?;
    T::parse(value).ok_or_else(|| {
        NotationError::Registry(RegistryError::UnknownValue {
            family: T::FAMILY,
            value: value.to_string(),
        })
    })
}

/// Split off the next whitespace-delimited token
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

/// Read a quoted string at the start of `s`, returning the text and the rest
fn take_quoted(s: &str) -> Result<(String, &str), NotationError> {
    let s = s.trim_start();
    let body = s
        .strip_prefix('"')
        .ok_or(NotationError::MissingSegment("quoted claim text"))?;

    let mut text = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, escaped)) => text.push(escaped),
                None => return Err(NotationError::UnterminatedQuote),
            },
            '"' => return Ok((text, &body[i + 1..])),
            other => text.push(other),
        }
    }
    Err(NotationError::UnterminatedQuote)
}

fn parse_citation(segment: &str) -> Result<EvidenceCitation, NotationError> {
    let segment = segment.trim();
    let source_end = segment.trim_end_matches(['★', '☆']).len();
    let (source, stars) = segment.split_at(source_end);
    if stars.is_empty() {
        return Err(NotationError::MissingSegment("evidence strength"));
    }
    if source.trim().is_empty() {
        return Err(NotationError::MissingSegment("evidence source"));
    }
    Ok(EvidenceCitation::new(
        lookup::<EvidenceSource>(source.trim())?,
        lookup::<EvidenceStrength>(stars)?,
    ))
}

fn parse_evidence(line: &str, rest: &str) -> Result<Evidence, NotationError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(Evidence::none());
    }
    let body = rest
        .strip_prefix(TURNSTILE)
        .ok_or_else(|| NotationError::malformed(line, "expected turnstile after claim text"))?
        .trim();

    if let Some(freeform) = body.strip_prefix(FREEFORM_MARK) {
        let (summary, trailing) = take_quoted(freeform)?;
        if !trailing.trim().is_empty() {
            return Err(NotationError::malformed(line, "text after freeform evidence"));
        }
        return Ok(Evidence::Freeform(summary));
    }

    body.split(CONJUNCTION)
        .map(parse_citation)
        .collect::<Result<Vec<_>, _>>()
        .map(Evidence::Structured)
}

/// Parse a compact claim line
///
/// # Examples
///
/// ```
/// use parley_notation::parse_claim_line;
/// use parley_domain::Confidence;
///
/// let parsed = parse_claim_line("② «Tenant» ◐⇆ ⚖ \"Fair split\" ⊢ 💰★").unwrap();
/// assert_eq!(parsed.position(), Some(2));
/// assert_eq!(parsed.confidence, Confidence::Moderate);
/// ```
pub fn parse_claim_line(line: &str) -> Result<ParsedClaimLine, NotationError> {
    let (marker, rest) = next_token(line).ok_or(NotationError::MissingSegment("claim marker"))?;

    let rest = rest.trim_start();
    let (role, rest) = match rest.strip_prefix('«') {
        Some(tagged) => {
            let end = tagged
                .find('»')
                .ok_or_else(|| NotationError::malformed(line, "unterminated role tag"))?;
            (Some(tagged[..end].trim().to_string()), &tagged[end + '»'.len_utf8()..])
        }
        None => (None, rest),
    };

    let (stance, rest) = next_token(rest).ok_or(NotationError::MissingSegment("confidence glyph"))?;
    let mut stance_chars = stance.char_indices();
    let split = match (stance_chars.next(), stance_chars.next()) {
        (Some(_), Some((i, _))) => i,
        _ => return Err(NotationError::MissingSegment("attitude glyph")),
    };
    let confidence = lookup::<Confidence>(&stance[..split])?;
    let attitude = lookup::<Attitude>(&stance[split..])?;

    let (type_glyph, rest) =
        next_token(rest).ok_or(NotationError::MissingSegment("claim type glyph"))?;
    let claim_type = lookup::<ClaimType>(type_glyph)?;

    let (claim_text, rest) = take_quoted(rest)?;
    let evidence = parse_evidence(line, rest)?;

    Ok(ParsedClaimLine {
        marker: marker.to_string(),
        role,
        confidence,
        attitude,
        claim_type,
        claim_text,
        evidence,
    })
}

/// Parse a relation line such as `① ⟶ ②  // because`
pub fn parse_relation_line(line: &str) -> Result<ArgumentLink, NotationError> {
    let (from, rest) = next_token(line).ok_or(NotationError::MissingSegment("source claim"))?;
    let (glyph, rest) = next_token(rest).ok_or(NotationError::MissingSegment("relation glyph"))?;
    let (to, rest) = next_token(rest).ok_or(NotationError::MissingSegment("target claim"))?;

    let mut link = ArgumentLink::new(from, lookup::<RelationType>(glyph)?, to);

    let rest = rest.trim();
    if !rest.is_empty() {
        let explanation = rest
            .strip_prefix(COMMENT)
            .ok_or_else(|| NotationError::malformed(line, "unexpected text after target claim"))?;
        if !explanation.trim().is_empty() {
            link = link.with_explanation(explanation.trim());
        }
    }

    Ok(link)
}
