use primorph_protocol::Prime;

/// Prime handed to the very first registered tag.
pub const BASE_PRIME: Prime = Prime::new(2);

/// Trial-division primality test.
///
/// Tag vocabularies stay in the low hundreds, so codes and quotients are small
/// enough that no sieve is warranted. 0 and 1 are not prime.
pub fn is_prime(n: u64) -> bool {
    match n {
        0 | 1 => false,
        2 | 3 | 5 | 7 => true,
        _ if n % 2 == 0 => false,
        _ => {
            let mut divisor = 3;
            // divisor <= sqrt(n) without overflowing the square
            while divisor <= n / divisor {
                if n % divisor == 0 {
                    return false;
                }
                divisor += 2;
            }
            true
        }
    }
}

/// Smallest prime strictly greater than `current`.
pub fn next_prime(current: Prime) -> Prime {
    let mut candidate = current.get() + 1;
    while !is_prime(candidate) {
        candidate += 1;
    }
    Prime::new(candidate)
}
