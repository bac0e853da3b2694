pub use crate::line_parsers::{
    candidate_type, extract_ssrc, is_rtp_candidate, match_prefix, media_direction,
    parse_fid_group, parse_fmtp_apt, parse_rtpmap, parse_ssrc_attribute, split_lines,
    split_sections, unique_extension_id, CandidateType, MediaDirection, RtpMap, SsrcAttribute,
};
pub use crate::transforms::SDP;

mod line_parsers;
mod transforms;
