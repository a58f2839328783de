//! Lookup tables over 13-bit rank masks (0..8191), built at compile time.
//!
//! - POPCNT13[mask]       -> number of ranks present
//! - HIBIT13[mask]        -> highest rank index (0..12) or -1
//! - STRAIGHT_END13[mask] -> top rank index of the best straight or -1;
//!                           the wheel A2345 reports 3 (Five-high)

use crate::bitboard::MASK13;

const N: usize = 1 << 13;
const WHEEL_MASK: u16 = (1u16 << 12) | 0b1111;

const fn hibit(x: u16) -> i8 {
    if x == 0 {
        -1
    } else {
        (15 - x.leading_zeros()) as i8
    }
}

const fn straight_end(mask: u16) -> i8 {
    // windows of five consecutive ranks, highest first
    let mut low: i8 = 8;
    while low >= 0 {
        let window: u16 = 0b1_1111 << (low as u16);
        if (mask & window) == window {
            return low + 4;
        }
        low -= 1;
    }
    if (mask & WHEEL_MASK) == WHEEL_MASK {
        return 3;
    }
    -1
}

const fn build_popcnt13() -> [u8; N] {
    let mut arr = [0u8; N];
    let mut i = 0;
    while i < N {
        arr[i] = (i as u16).count_ones() as u8;
        i += 1;
    }
    arr
}

const fn build_hibit13() -> [i8; N] {
    let mut arr = [0i8; N];
    let mut i = 0;
    while i < N {
        arr[i] = hibit(i as u16);
        i += 1;
    }
    arr
}

const fn build_straight_end13() -> [i8; N] {
    let mut arr = [0i8; N];
    let mut i = 0;
    while i < N {
        arr[i] = straight_end(i as u16);
        i += 1;
    }
    arr
}

pub static POPCNT13: [u8; N] = build_popcnt13();
pub static HIBIT13: [i8; N] = build_hibit13();
pub static STRAIGHT_END13: [i8; N] = build_straight_end13();

#[inline(always)]
pub fn popcnt13(mask: u16) -> u8 {
    POPCNT13[(mask & MASK13) as usize]
}

#[inline(always)]
pub fn hibit13(mask: u16) -> i8 {
    HIBIT13[(mask & MASK13) as usize]
}

#[inline(always)]
pub fn straight_end13(mask: u16) -> i8 {
    STRAIGHT_END13[(mask & MASK13) as usize]
}

/// Highest `K` rank indices of `mask`, high to low. Missing entries are 0.
#[inline(always)]
pub fn top_ranks13<const K: usize>(mut mask: u16) -> [u8; K] {
    let mut out = [0u8; K];
    for slot in out.iter_mut() {
        let r = hibit13(mask);
        if r < 0 {
            break;
        }
        *slot = r as u8;
        mask &= !(1u16 << (r as u16));
    }
    out
}
