use crate::line_parsers::{
    candidate_type, extract_ssrc, match_prefix, media_direction, parse_fid_group, parse_fmtp_apt,
    parse_rtpmap, parse_ssrc_attribute, payload_after_prefix, split_lines, split_sections,
    unique_extension_id, CandidateType, MediaDirection, AUDIO_MEDIA_LINE_PREFIX,
    CANDIDATE_ATTRIBUTE_PREFIX, CRLF, EXTMAP_ATTRIBUTE_PREFIX, FID_GROUP_PREFIX,
    FMTP_ATTRIBUTE_PREFIX, MEDIA_LINE_PREFIX, RTCP_FB_ATTRIBUTE_PREFIX,
    RTPMAP_ATTRIBUTE_PREFIX, SSRC_ATTRIBUTE_PREFIX, SSRC_GROUP_ATTRIBUTE_PREFIX,
    VIDEO_MEDIA_LINE_PREFIX,
};

/// One session description. Every rewrite returns a new value, the wrapped
/// text is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SDP {
    raw: String,
}

impl SDP {
    pub fn new(raw: String) -> Self {
        SDP { raw }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn lines(&self) -> Vec<&str> {
        split_lines(&self.raw)
    }

    pub fn sections(&self) -> Vec<String> {
        split_sections(&self.raw)
    }

    pub fn has_video(&self) -> bool {
        !match_prefix(&self.raw, VIDEO_MEDIA_LINE_PREFIX).is_empty()
    }

    pub fn has_candidates(&self) -> bool {
        !match_prefix(&self.raw, CANDIDATE_ATTRIBUTE_PREFIX).is_empty()
    }

    /// A connection line still pointing at the wildcard address means
    /// candidate gathering has not covered every media section yet.
    pub fn has_candidates_for_all_m_lines(&self) -> bool {
        !self.raw.contains(UNRESOLVED_CONNECTION_LINE)
    }

    /// Widens the audio bundle group to cover video. Identity when the
    /// description has no video section.
    pub fn with_bundle_audio_video(&self) -> SDP {
        if !self.has_video() {
            return self.clone();
        }
        let lines = split_lines(&self.raw)
            .into_iter()
            .map(|line| {
                if line == BUNDLE_AUDIO_LINE {
                    BUNDLE_AUDIO_VIDEO_LINE.to_string()
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<String>>();
        SDP::from_lines(lines)
    }

    pub fn without_server_reflexive_candidates(&self) -> SDP {
        self.without_candidate_type(CandidateType::ServerReflexive)
    }

    pub fn without_candidate_type(&self, excluded: CandidateType) -> SDP {
        let lines = split_lines(&self.raw)
            .into_iter()
            .filter(|&line| candidate_type(line) != Some(excluded))
            .map(str::to_string)
            .collect::<Vec<String>>();
        SDP::from_lines(lines)
    }

    /// Caps every video section's bandwidth right after its media line.
    /// Runtimes that expect bits per second get a TIAS line instead of AS.
    pub fn with_bandwidth_restriction(&self, max_bitrate_kbps: u32, use_alternate_unit: bool) -> SDP {
        let mut lines = Vec::new();
        for line in split_lines(&self.raw) {
            lines.push(line.to_string());
            if line.starts_with(VIDEO_MEDIA_LINE_PREFIX) {
                if use_alternate_unit {
                    lines.push(format!("b=TIAS:{}", u64::from(max_bitrate_kbps) * 1000));
                } else {
                    lines.push(format!("b=AS:{}", max_bitrate_kbps));
                }
            }
        }
        SDP::from_lines(lines)
    }

    /// Merges the given key=value pairs into the Opus format line of each
    /// audio section, overriding parameters carrying the same key. Sections
    /// that map no Opus payload are left alone.
    pub fn with_opus_fmtp_parameters(&self, parameters: &[(&str, &str)]) -> SDP {
        let sections = split_sections(&self.raw)
            .into_iter()
            .map(|section| {
                if section.starts_with(AUDIO_MEDIA_LINE_PREFIX) {
                    merge_opus_parameters(&section, parameters)
                } else {
                    section
                }
            })
            .collect::<Vec<String>>();
        SDP::from_sections(sections)
    }

    /// Requests an Opus bitrate clamped to the RFC 7587 range. Passing 0
    /// leaves the description unchanged.
    pub fn with_audio_max_average_bitrate(&self, max_average_bitrate: u32) -> SDP {
        if max_average_bitrate == 0 {
            return self.clone();
        }
        let clamped = max_average_bitrate
            .clamp(RFC_7587_LOWEST_BITRATE, RFC_7587_HIGHEST_BITRATE)
            .to_string();
        self.with_opus_fmtp_parameters(&[("maxaveragebitrate", clamped.as_str())])
    }

    pub fn with_stereo_audio(&self) -> SDP {
        self.with_opus_fmtp_parameters(&[("stereo", "1"), ("sprop-stereo", "1")])
    }

    /// Rewrites the origin line for runtimes that only accept the
    /// unified-plan dialect. Descriptions already carrying a mozilla origin
    /// pass through unchanged.
    pub fn with_unified_plan_format(&self) -> SDP {
        if self.raw.contains(COMPAT_ORIGIN_MARKER) {
            return self.clone();
        }
        let rewritten = self
            .raw
            .replacen(DEFAULT_ORIGIN_PREFIX, COMPAT_ORIGIN_PREFIX, 1);
        SDP {
            raw: format!("{}{}", rewritten.trim(), CRLF),
        }
    }

    /// Maps the video-layers-allocation header extension under the lowest
    /// free extension id in each sendrecv video section. Sections with no
    /// id left in range, or that already map the extension, are skipped.
    pub fn with_video_layers_allocation_extension(&self) -> SDP {
        let sections = split_sections(&self.raw)
            .into_iter()
            .map(|section| {
                if !section.starts_with(VIDEO_MEDIA_LINE_PREFIX)
                    || !section.contains(SENDRECV_ATTRIBUTE)
                    || section.contains(VIDEO_LAYERS_ALLOCATION_EXTENSION)
                {
                    return section;
                }
                let lines = split_lines(&section);
                let extension_id = unique_extension_id(&lines);
                if extension_id < 0 {
                    return section;
                }
                let mut rewritten = Vec::with_capacity(lines.len() + 1);
                for line in lines {
                    rewritten.push(line.to_string());
                    if line == SENDRECV_ATTRIBUTE {
                        rewritten.push(format!(
                            "{}{} {}",
                            EXTMAP_ATTRIBUTE_PREFIX, extension_id, VIDEO_LAYERS_ALLOCATION_EXTENSION
                        ));
                    }
                }
                format!("{}{}", rewritten.join(CRLF), CRLF)
            })
            .collect::<Vec<String>>();
        SDP::from_sections(sections)
    }

    /// Moves the H264 payload ahead of VP8 in the media line of every video
    /// section mapping both codecs, so endpoints honoring list order pick
    /// H264. Sections mapping only one of the two, or where H264 already
    /// leads, are left alone.
    pub fn prefer_h264_if_exists(&self) -> SDP {
        let sections = split_sections(&self.raw)
            .into_iter()
            .map(|section| {
                if !section.starts_with(VIDEO_MEDIA_LINE_PREFIX) {
                    return section;
                }
                let lines = split_lines(&section);
                let h264_payload = payload_for_codec(&lines, H264_CODEC_NAME);
                let vp8_payload = payload_for_codec(&lines, VP8_CODEC_NAME);
                let (h264_payload, vp8_payload) = match (h264_payload, vp8_payload) {
                    (Some(h264_payload), Some(vp8_payload)) => (h264_payload, vp8_payload),
                    _ => return section,
                };
                let rewritten = lines
                    .into_iter()
                    .map(|line| {
                        if line.starts_with(VIDEO_MEDIA_LINE_PREFIX) {
                            swap_payload_order(line, h264_payload, vp8_payload)
                        } else {
                            line.to_string()
                        }
                    })
                    .collect::<Vec<String>>();
                format!("{}{}", rewritten.join(CRLF), CRLF)
            })
            .collect::<Vec<String>>();
        SDP::from_sections(sections)
    }

    /// Replaces the camera section's SSRC block with `layer_count`
    /// synthesized primary/retransmission pairs plus one SIM group listing
    /// the primaries in layer order. Returns the description unchanged when
    /// fewer than two layers are requested or the metadata the synthesis
    /// needs is missing.
    pub fn with_legacy_simulcast(&self, layer_count: u32) -> SDP {
        let mut sections = split_sections(&self.raw);
        if layer_count < 2 || sections.len() < 2 {
            return self.clone();
        }
        let camera_index = match find_active_camera_section(&sections) {
            Some(index) => index,
            None => return self.clone(),
        };
        let camera_lines = split_lines(&sections[camera_index]);

        let fid_pair = camera_lines.iter().find_map(|line| parse_fid_group(line));
        let (mut video_ssrc, mut rtx_ssrc) = match fid_pair {
            Some(pair) => pair,
            None => return self.clone(),
        };
        let cname = camera_lines.iter().find_map(|line| {
            parse_ssrc_attribute(line)
                .filter(|attribute| attribute.name == CNAME_ATTRIBUTE_NAME)
                .map(|attribute| attribute.value)
        });
        let msid = camera_lines.iter().find_map(|line| {
            parse_ssrc_attribute(line)
                .filter(|attribute| attribute.name == MSID_ATTRIBUTE_NAME)
                .map(|attribute| attribute.value)
        });
        let (cname, msid) = match (cname, msid) {
            (Some(cname), Some(msid)) => (cname, msid),
            _ => return self.clone(),
        };

        let mut rewritten = camera_lines
            .iter()
            .filter(|line| {
                !line.starts_with(SSRC_ATTRIBUTE_PREFIX)
                    && !line.starts_with(SSRC_GROUP_ATTRIBUTE_PREFIX)
            })
            .map(|line| (*line).to_string())
            .collect::<Vec<String>>();

        let mut simulcast_ssrcs = Vec::with_capacity(layer_count as usize);
        for _ in 0..layer_count {
            rewritten.push(format!("a=ssrc:{} cname:{}", video_ssrc, cname));
            rewritten.push(format!("a=ssrc:{} msid:{}", video_ssrc, msid));
            rewritten.push(format!("a=ssrc:{} cname:{}", rtx_ssrc, cname));
            rewritten.push(format!("a=ssrc:{} msid:{}", rtx_ssrc, msid));
            rewritten.push(format!("{}{} {}", FID_GROUP_PREFIX, video_ssrc, rtx_ssrc));
            simulcast_ssrcs.push(video_ssrc.to_string());
            video_ssrc = video_ssrc.wrapping_add(1);
            rtx_ssrc = video_ssrc.wrapping_add(1);
        }
        rewritten.push(format!("{} {}", SIM_GROUP_PREFIX, simulcast_ssrcs.join(" ")));

        sections[camera_index] = format!("{}{}", rewritten.join(CRLF), CRLF);
        SDP::from_sections(sections)
    }

    /// Strips every H264 payload, and every retransmission payload bound to
    /// one through an apt back-reference, from the camera section's media
    /// line and attribute lines.
    pub fn without_h264_send_payloads(&self) -> SDP {
        let mut sections = split_sections(&self.raw);
        let camera_index = match find_active_camera_section(&sections) {
            Some(index) => index,
            None => return self.clone(),
        };
        let lines = split_lines(&sections[camera_index]);

        let mut removed_payloads = lines
            .iter()
            .filter_map(|line| parse_rtpmap(line))
            .filter(|rtpmap| codec_name(&rtpmap.codec).eq_ignore_ascii_case(H264_CODEC_NAME))
            .map(|rtpmap| rtpmap.payload)
            .collect::<Vec<u32>>();
        let rtx_payloads = lines
            .iter()
            .filter_map(|line| parse_fmtp_apt(line))
            .filter(|(_, primary)| removed_payloads.contains(primary))
            .map(|(rtx, _)| rtx)
            .collect::<Vec<u32>>();
        removed_payloads.extend(rtx_payloads);
        if removed_payloads.is_empty() {
            return self.clone();
        }

        let mut rewritten = Vec::with_capacity(lines.len());
        for line in lines {
            if line_references_payload(line, &removed_payloads) {
                continue;
            }
            if line.starts_with(VIDEO_MEDIA_LINE_PREFIX) {
                rewritten.push(strip_payloads_from_media_line(line, &removed_payloads));
            } else {
                rewritten.push(line.to_string());
            }
        }
        sections[camera_index] = format!("{}{}", rewritten.join(CRLF), CRLF);
        SDP::from_sections(sections)
    }

    /// First direction attribute of each video section, in section order.
    /// Sections without one are omitted.
    pub fn video_section_directions(&self) -> Vec<MediaDirection> {
        split_sections(&self.raw)
            .iter()
            .filter(|section| section.starts_with(VIDEO_MEDIA_LINE_PREFIX))
            .filter_map(|section| split_lines(section).into_iter().find_map(media_direction))
            .collect()
    }

    /// Keeps everything ahead of the first video section and adopts the
    /// other description's video sections in its place.
    pub fn copy_video(&self, other: &SDP) -> SDP {
        let mut lines = Vec::new();
        for line in split_lines(&self.raw) {
            if line.starts_with(VIDEO_MEDIA_LINE_PREFIX) {
                break;
            }
            lines.push(line.to_string());
        }
        let mut in_video_section = false;
        for line in split_lines(&other.raw) {
            if line.starts_with(MEDIA_LINE_PREFIX) {
                in_video_section = line.starts_with(VIDEO_MEDIA_LINE_PREFIX);
            }
            if in_video_section {
                lines.push(line.to_string());
            }
        }
        SDP::from_lines(lines)
    }

    /// Primary SSRC of the send-capable video section: the leading id of
    /// its first FID pair, or the first plain ssrc attribute when the
    /// section carries no retransmission group.
    pub fn ssrc_for_video_sending_section(&self) -> Option<u32> {
        let sections = split_sections(&self.raw);
        if sections.len() < 2 {
            return None;
        }
        let camera_index = find_active_camera_section(&sections)?;
        let camera_lines = split_lines(&sections[camera_index]);
        if let Some((primary, _)) = camera_lines.iter().find_map(|line| parse_fid_group(line)) {
            return Some(primary);
        }
        let ssrc = camera_lines
            .iter()
            .find(|line| line.starts_with(SSRC_ATTRIBUTE_PREFIX))
            .copied()
            .map(extract_ssrc)
            .unwrap_or(0);
        if ssrc == 0 {
            return None;
        }
        Some(ssrc)
    }

    /// True only when both descriptions expose a sending-section SSRC and
    /// the two differ.
    pub fn video_send_section_has_different_ssrc(&self, previous: &SDP) -> bool {
        let current_ssrc = self.ssrc_for_video_sending_section();
        let previous_ssrc = previous.ssrc_for_video_sending_section();
        match (current_ssrc, previous_ssrc) {
            (Some(current_ssrc), Some(previous_ssrc)) => current_ssrc != previous_ssrc,
            _ => false,
        }
    }

    fn from_lines(lines: Vec<String>) -> SDP {
        SDP {
            raw: format!("{}{}", lines.join(CRLF), CRLF),
        }
    }

    fn from_sections(sections: Vec<String>) -> SDP {
        SDP {
            raw: sections.concat(),
        }
    }
}

impl From<SDP> for String {
    fn from(sdp: SDP) -> Self {
        sdp.raw
    }
}

fn find_active_camera_section(sections: &[String]) -> Option<usize> {
    sections.iter().position(|section| {
        section.starts_with(VIDEO_MEDIA_LINE_PREFIX)
            && (section.contains(SENDRECV_DIRECTION) || section.contains(SENDONLY_DIRECTION))
    })
}

fn merge_opus_parameters(section: &str, parameters: &[(&str, &str)]) -> String {
    let lines = split_lines(section);
    let mut opus = None;
    for (index, line) in lines.iter().enumerate() {
        if let Some(rtpmap) = parse_rtpmap(line) {
            if rtpmap.codec.to_ascii_lowercase().starts_with(OPUS_CODEC_PREFIX) {
                opus = Some((index, rtpmap.payload));
                break;
            }
        }
    }
    let (rtpmap_index, payload) = match opus {
        Some(found) => found,
        None => return section.to_string(),
    };

    let attribute_prefix = format!("{}{} ", FMTP_ATTRIBUTE_PREFIX, payload);
    let bare_attribute = format!("{}{}", FMTP_ATTRIBUTE_PREFIX, payload);
    let mut rewritten = Vec::with_capacity(lines.len() + 1);
    let mut merged = false;
    for line in &lines {
        if !merged && (line.starts_with(attribute_prefix.as_str()) || *line == bare_attribute) {
            let existing = line
                .strip_prefix(bare_attribute.as_str())
                .unwrap_or("")
                .trim_start();
            rewritten.push(format!(
                "{}{}",
                attribute_prefix,
                merge_parameters(existing, parameters)
            ));
            merged = true;
        } else {
            rewritten.push((*line).to_string());
        }
    }
    if !merged {
        rewritten.insert(
            rtpmap_index + 1,
            format!("{}{}", attribute_prefix, merge_parameters("", parameters)),
        );
    }
    format!("{}{}", rewritten.join(CRLF), CRLF)
}

fn merge_parameters(existing: &str, parameters: &[(&str, &str)]) -> String {
    let overridden = parameters.iter().map(|(key, _)| *key).collect::<Vec<&str>>();
    let mut merged = existing
        .split(';')
        .map(str::trim)
        .filter(|parameter| !parameter.is_empty())
        .filter(|parameter| {
            parameter
                .split('=')
                .next()
                .map(|key| !overridden.contains(&key))
                .unwrap_or(true)
        })
        .map(str::to_string)
        .collect::<Vec<String>>();
    for (key, value) in parameters {
        merged.push(format!("{}={}", key, value));
    }
    merged.join(";")
}

fn codec_name(codec: &str) -> &str {
    codec.split('/').next().unwrap_or(codec)
}

fn payload_for_codec(lines: &[&str], name: &str) -> Option<u32> {
    lines.iter().find_map(|line| {
        let rtpmap = parse_rtpmap(line)?;
        if codec_name(&rtpmap.codec).eq_ignore_ascii_case(name) {
            Some(rtpmap.payload)
        } else {
            None
        }
    })
}

fn swap_payload_order(media_line: &str, preferred: u32, other: u32) -> String {
    let mut tokens = media_line.split_whitespace().collect::<Vec<&str>>();
    let preferred_token = preferred.to_string();
    let other_token = other.to_string();
    let preferred_index = tokens
        .iter()
        .skip(3)
        .position(|token| *token == preferred_token)
        .map(|index| index + 3);
    let other_index = tokens
        .iter()
        .skip(3)
        .position(|token| *token == other_token)
        .map(|index| index + 3);
    match (preferred_index, other_index) {
        (Some(preferred_index), Some(other_index)) if other_index < preferred_index => {
            tokens.swap(preferred_index, other_index);
            tokens.join(" ")
        }
        _ => media_line.to_string(),
    }
}

fn line_references_payload(line: &str, payloads: &[u32]) -> bool {
    [
        RTPMAP_ATTRIBUTE_PREFIX,
        RTCP_FB_ATTRIBUTE_PREFIX,
        FMTP_ATTRIBUTE_PREFIX,
    ]
    .into_iter()
    .filter_map(|prefix| payload_after_prefix(line, prefix))
    .any(|payload| payloads.contains(&payload))
}

fn strip_payloads_from_media_line(media_line: &str, payloads: &[u32]) -> String {
    media_line
        .split_whitespace()
        .enumerate()
        .filter(|(index, token)| {
            if *index < 3 {
                return true;
            }
            token
                .parse::<u32>()
                .map(|payload| !payloads.contains(&payload))
                .unwrap_or(true)
        })
        .map(|(_, token)| token)
        .collect::<Vec<&str>>()
        .join(" ")
}

const BUNDLE_AUDIO_LINE: &str = "a=group:BUNDLE audio";
const BUNDLE_AUDIO_VIDEO_LINE: &str = "a=group:BUNDLE audio video";
const UNRESOLVED_CONNECTION_LINE: &str = "c=IN IP4 0.0.0.0";
const DEFAULT_ORIGIN_PREFIX: &str = "o=-";
const COMPAT_ORIGIN_PREFIX: &str = "o=mozilla-chrome";
const COMPAT_ORIGIN_MARKER: &str = "mozilla";
const SENDRECV_ATTRIBUTE: &str = "a=sendrecv";
const SENDRECV_DIRECTION: &str = "sendrecv";
const SENDONLY_DIRECTION: &str = "sendonly";
const SIM_GROUP_PREFIX: &str = "a=ssrc-group:SIM";
const CNAME_ATTRIBUTE_NAME: &str = "cname";
const MSID_ATTRIBUTE_NAME: &str = "msid";
const VIDEO_LAYERS_ALLOCATION_EXTENSION: &str =
    "http://www.webrtc.org/experiments/rtp-hdrext/video-layers-allocation00";
const H264_CODEC_NAME: &str = "h264";
const VP8_CODEC_NAME: &str = "vp8";
const OPUS_CODEC_PREFIX: &str = "opus/48000";
const RFC_7587_LOWEST_BITRATE: u32 = 6000;
const RFC_7587_HIGHEST_BITRATE: u32 = 510000;
