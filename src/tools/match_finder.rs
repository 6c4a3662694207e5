//! Greedy backreference search shared by the LZ encoders.
//!
//! The search window is the already-emitted region of the source buffer,
//! at most 0x1000 bytes behind the cursor.  Candidate distances are tried
//! from 2 upward (distance 1 is never tried) and the first strict
//! improvement wins, so ties go to the smaller distance.

/// Count how far the run at `pos - dist` matches the lookahead at `pos`.
/// The first pass is capped at `n_max`; if every byte of it matches, the
/// comparison restarts at the beginning of the run while the lookahead
/// keeps going, up to `n_abs` total.  This mirrors the byte-by-byte copy
/// the decoders perform, so a match may extend past the window into the
/// bytes it will itself produce.
fn matching_run(src: &[u8], pos: usize, dist: usize, n_max: usize, n_abs: usize) -> usize {
    let n_max = n_max.min(n_abs);
    let mut n_same = 0;
    for i in 0..n_max {
        if src[pos - dist + i] != src[pos + i] {
            return n_same;
        }
        n_same += 1;
    }
    for i in 0..n_abs - n_max {
        if src[pos - dist + i] != src[pos + n_max + i] {
            break;
        }
        n_same += 1;
    }
    n_same
}

/// Find the longest backreference for the lookahead at `pos`, with match
/// lengths capped at `max_len`.  Returns `(length, distance)`; a length
/// below the caller's minimum means no usable match.  Once the running
/// best reaches 0x12 the scan stops improving, even for formats whose
/// maximum is larger.
pub fn longest_match(src: &[u8], pos: usize, max_len: usize) -> (usize, usize) {
    let mut max_search = 0x1000;
    if max_search > pos {
        max_search = pos;
    }
    let bytes_left = src.len() - pos;
    let mut best = 0;
    let mut best_dist = 0;
    for dist in 2..max_search {
        let n_max = max_len.min(dist);
        let n_abs = max_len.min(bytes_left);
        let n_matched = matching_run(src, pos, dist, n_max, n_abs);
        if n_matched > best {
            if best == 0x12 {
                break;
            }
            best = n_matched;
            best_dist = dist;
        }
    }
    (best, best_dist)
}

#[test]
fn no_window() {
    assert_eq!(longest_match(b"ABCABC", 0, 0x12), (0, 0));
    assert_eq!(longest_match(b"ABCABC", 1, 0x12), (0, 0));
}

#[test]
fn simple_repeat() {
    // the candidate scan is exclusive of the full window size, so a
    // window of exactly 3 cannot supply a distance-3 match
    assert_eq!(longest_match(b"ABCABC", 3, 0x12), (0, 0));
    // with a deeper window the distance-3 repeat is found
    let (len, dist) = longest_match(b"ABCABCABC", 6, 0x12);
    assert_eq!((len, dist), (3, 3));
}

#[test]
fn run_extends_into_lookahead() {
    // window "AAA" at distance 2 cycles through itself for the whole run
    let src = b"AAAAAAAA";
    let (len, dist) = longest_match(src, 3, 0x12);
    assert_eq!((len, dist), (5, 2));
}

#[test]
fn capped_at_format_maximum() {
    let src = vec![0x41u8; 200];
    let (len, dist) = longest_match(&src, 100, 0x12);
    assert_eq!(len, 0x12);
    assert_eq!(dist, 2);
}

#[test]
fn long_match_allowed_when_cap_is_high() {
    // a single improvement can jump straight past 0x12
    let src = vec![0x41u8; 600];
    let (len, dist) = longest_match(&src, 100, 0xFFFF + 0x111);
    assert_eq!(len, 500);
    assert_eq!(dist, 2);
}

#[test]
fn smaller_distance_wins_ties() {
    // "ABAB|ABAB...": distances 2 and 4 both match, 2 is found first
    let src = b"ABABABABAB";
    let (len, dist) = longest_match(src, 4, 0x12);
    assert_eq!(len, 6);
    assert_eq!(dist, 2);
}
