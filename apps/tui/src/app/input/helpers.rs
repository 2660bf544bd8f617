pub const PAGE_STEP: usize = 5;

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Moves `index` down by `step`, stopping on the last row
pub const fn step_down(index: usize, len: usize, step: usize) -> usize {
    if len == 0 {
        return 0;
    }

    let next = index + step;
    if next >= len {
        len - 1
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_steps_cycle_through_bounds() {
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_increment(0, 0), 0);
    }

    #[test]
    fn paging_stops_on_last_row() {
        assert_eq!(step_down(0, 12, PAGE_STEP), 5);
        assert_eq!(step_down(9, 12, PAGE_STEP), 11);
        assert_eq!(step_down(0, 0, PAGE_STEP), 0);
    }
}
