#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateType {
    Host,
    ServerReflexive,
    PeerReflexive,
    Relay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaDirection {
    Inactive,
    SendOnly,
    RecvOnly,
    SendRecv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SsrcAttribute {
    pub ssrc: u32,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RtpMap {
    pub payload: u32,
    pub codec: String,
}

pub fn split_lines(blob: &str) -> Vec<&str> {
    blob.trim().split('\n').map(str::trim).collect()
}

/// Splits at each media line. Index 0 is the session header, every other
/// entry starts with its own "m=" line. Each section keeps its CRLF
/// terminator so rejoining the sections reproduces the description.
pub fn split_sections(blob: &str) -> Vec<String> {
    blob.split("\nm=")
        .enumerate()
        .map(|(index, section)| {
            if index == 0 {
                format!("{}{}", section.trim(), CRLF)
            } else {
                format!("m={}{}", section.trim(), CRLF)
            }
        })
        .collect()
}

pub fn match_prefix<'a>(blob: &'a str, prefix: &str) -> Vec<&'a str> {
    split_lines(blob)
        .into_iter()
        .filter(|line| line.starts_with(prefix))
        .collect()
}

pub fn candidate_type(line: &str) -> Option<CandidateType> {
    let line = line.trim();
    if !line.starts_with(CANDIDATE_ATTRIBUTE_PREFIX) {
        return None;
    }
    let (_, rest) = line.split_once(" typ ")?;
    match rest.split_whitespace().next()? {
        "host" => Some(CandidateType::Host),
        "srflx" => Some(CandidateType::ServerReflexive),
        "prflx" => Some(CandidateType::PeerReflexive),
        "relay" => Some(CandidateType::Relay),
        _ => None,
    }
}

/// Leading SSRC id of an "a=ssrc:" line, 0 when the line does not carry one.
pub fn extract_ssrc(line: &str) -> u32 {
    line.trim()
        .strip_prefix(SSRC_ATTRIBUTE_PREFIX)
        .and_then(|rest| {
            let digit_count = rest.chars().take_while(|c| c.is_ascii_digit()).count();
            if digit_count == 0 || !rest[digit_count..].starts_with(char::is_whitespace) {
                return None;
            }
            rest[..digit_count].parse::<u32>().ok()
        })
        .unwrap_or(0)
}

pub fn parse_ssrc_attribute(line: &str) -> Option<SsrcAttribute> {
    let line = line.trim();
    if !line.starts_with(SSRC_ATTRIBUTE_PREFIX) {
        return None;
    }
    let (_, attribute) = line.split_once(' ')?;
    let (name, value) = attribute
        .split_once(':')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .unwrap_or((attribute.to_string(), String::new()));
    Some(SsrcAttribute {
        ssrc: extract_ssrc(line),
        name,
        value,
    })
}

pub fn parse_fid_group(line: &str) -> Option<(u32, u32)> {
    let rest = line.trim().strip_prefix(FID_GROUP_PREFIX)?;
    let mut ssrcs = rest.split_whitespace();
    let primary = ssrcs.next()?.parse::<u32>().ok()?;
    let rtx = ssrcs.next()?.parse::<u32>().ok()?;
    Some((primary, rtx))
}

pub fn parse_rtpmap(line: &str) -> Option<RtpMap> {
    let rest = line
        .trim()
        .strip_prefix(RTPMAP_ATTRIBUTE_PREFIX)?
        .trim_start();
    let (payload, codec) = rest.split_once(' ')?;
    Some(RtpMap {
        payload: payload.parse::<u32>().ok()?,
        codec: codec.trim().to_string(),
    })
}

/// Resolves an "a=fmtp:<rtx> ... apt=<primary>" back-reference to
/// (rtx payload, primary payload).
pub fn parse_fmtp_apt(line: &str) -> Option<(u32, u32)> {
    let rest = line.trim().strip_prefix(FMTP_ATTRIBUTE_PREFIX)?;
    let (payload, parameters) = rest.split_once(' ')?;
    let rtx_payload = payload.parse::<u32>().ok()?;
    let apt_index = parameters.find("apt=")?;
    let digits: String = parameters[apt_index + 4..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let primary_payload = digits.parse::<u32>().ok()?;
    Some((rtx_payload, primary_payload))
}

pub fn media_direction(line: &str) -> Option<MediaDirection> {
    let line = line.trim();
    if line.starts_with("a=inactive") {
        return Some(MediaDirection::Inactive);
    }
    if line.starts_with("a=sendonly") {
        return Some(MediaDirection::SendOnly);
    }
    if line.starts_with("a=recvonly") {
        return Some(MediaDirection::RecvOnly);
    }
    if line.starts_with("a=sendrecv") {
        return Some(MediaDirection::SendRecv);
    }
    None
}

pub fn is_rtp_candidate(line: &str) -> bool {
    line.find("candidate:")
        .map(|index| {
            let mut tokens = line[index..].split_whitespace();
            tokens.next();
            tokens.next() == Some("1")
        })
        .unwrap_or(false)
}

/// Lowest extension id in [1,14] the given lines leave unused: the first
/// gap between the ids already mapped, else the next id after the highest.
/// Returns -1 when the range is exhausted.
pub fn unique_extension_id(lines: &[&str]) -> i32 {
    let mut extension_ids = lines
        .iter()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix(EXTMAP_ATTRIBUTE_PREFIX)?;
            let digit_count = rest.chars().take_while(|c| c.is_ascii_digit()).count();
            if digit_count == 0 {
                return None;
            }
            rest[..digit_count].parse::<u32>().ok()
        })
        .collect::<Vec<u32>>();
    extension_ids.sort_unstable();

    let mut previous_id = 0;
    for id in extension_ids {
        if id > previous_id + 1 {
            return (previous_id + 1) as i32;
        }
        previous_id = id;
    }
    if previous_id >= MAX_EXTENSION_ID {
        return -1;
    }
    (previous_id + 1) as i32
}

pub(crate) fn payload_after_prefix(line: &str, prefix: &str) -> Option<u32> {
    let rest = line.trim().strip_prefix(prefix)?.trim_start();
    let digit_count = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digit_count == 0 {
        return None;
    }
    let boundary = rest[digit_count..].is_empty()
        || rest[digit_count..].starts_with(char::is_whitespace);
    if !boundary {
        return None;
    }
    rest[..digit_count].parse().ok()
}

pub(crate) const CRLF: &str = "\r\n";
pub(crate) const MEDIA_LINE_PREFIX: &str = "m=";
pub(crate) const AUDIO_MEDIA_LINE_PREFIX: &str = "m=audio";
pub(crate) const VIDEO_MEDIA_LINE_PREFIX: &str = "m=video";
pub(crate) const CANDIDATE_ATTRIBUTE_PREFIX: &str = "a=candidate:";
pub(crate) const SSRC_ATTRIBUTE_PREFIX: &str = "a=ssrc:";
pub(crate) const SSRC_GROUP_ATTRIBUTE_PREFIX: &str = "a=ssrc-group:";
pub(crate) const FID_GROUP_PREFIX: &str = "a=ssrc-group:FID ";
pub(crate) const EXTMAP_ATTRIBUTE_PREFIX: &str = "a=extmap:";
pub(crate) const RTPMAP_ATTRIBUTE_PREFIX: &str = "a=rtpmap:";
pub(crate) const FMTP_ATTRIBUTE_PREFIX: &str = "a=fmtp:";
pub(crate) const RTCP_FB_ATTRIBUTE_PREFIX: &str = "a=rtcp-fb:";
const MAX_EXTENSION_ID: u32 = 14;
