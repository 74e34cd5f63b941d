/// Reed-Solomon error correction for read-back blocks
/// Syndromes, Berlekamp-Massey, Chien search and Forney over GF(256)
use crate::encoder::reed_solomon::Gf256;

/// Reed-Solomon decoder for one block (data followed by parity)
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` parity codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` in place, returning the number of fixed codewords
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, &'static str> {
        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = find_error_locator(&syndrome);
        let error_positions = find_error_positions(&sigma, received.len())?;
        let error_values = find_error_values(&sigma, &syndrome, &error_positions, received.len())?;

        for (&pos, &value) in error_positions.iter().zip(&error_values) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err("uncorrectable block");
        }
        Ok(error_positions.len())
    }

    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        let n = received.len();
        (0..self.num_ecc_codewords)
            .map(|i| {
                // Descending convention: c[0] is coefficient of x^(n-1)
                received.iter().enumerate().fold(0u8, |sum, (j, &c)| {
                    sum ^ Gf256::mul(c, Gf256::pow_usize(2, i * (n - 1 - j)))
                })
            })
            .collect()
    }
}

/// Berlekamp-Massey: error locator sigma with sigma[0] = 1
fn find_error_locator(syndrome: &[u8]) -> Vec<u8> {
    let mut sigma = vec![1u8];
    let mut b = vec![1u8];
    let mut delta_b: u8 = 1;
    let mut l = 0;
    let mut m = 1;

    for i in 0..syndrome.len() {
        let mut delta = syndrome[i];
        for j in 1..=l.min(sigma.len() - 1) {
            delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
        }

        if delta == 0 {
            m += 1;
            continue;
        }

        let previous = sigma.clone();
        let d = Gf256::div(delta, delta_b);
        if sigma.len() < b.len() + m {
            sigma.resize(b.len() + m, 0);
        }
        // sigma = sigma - d * x^m * b
        for (j, &bj) in b.iter().enumerate() {
            sigma[j + m] ^= Gf256::mul(d, bj);
        }

        if 2 * l <= i {
            b = previous;
            delta_b = delta;
            l = i + 1 - l;
            m = 1;
        } else {
            m += 1;
        }
    }

    while sigma.len() > 1 && sigma.last() == Some(&0) {
        sigma.pop();
    }
    sigma
}

/// alpha^-(n-1-pos): the root of sigma for an error at `pos`
fn inverse_locator(n: usize, pos: usize) -> u8 {
    let exp = (n - 1 - pos) % 255;
    Gf256::exp(255 - exp)
}

fn eval(poly: &[u8], x: u8) -> u8 {
    poly.iter()
        .enumerate()
        .fold(0u8, |acc, (i, &c)| acc ^ Gf256::mul(c, Gf256::pow_usize(x, i)))
}

/// Chien search over every codeword position
fn find_error_positions(sigma: &[u8], n: usize) -> Result<Vec<usize>, &'static str> {
    let positions: Vec<usize> = (0..n)
        .filter(|&pos| eval(sigma, inverse_locator(n, pos)) == 0)
        .collect();
    if positions.len() != sigma.len() - 1 {
        return Err("error locator roots do not match its degree");
    }
    Ok(positions)
}

/// Forney algorithm for first consecutive root alpha^0
fn find_error_values(
    sigma: &[u8],
    syndrome: &[u8],
    error_positions: &[usize],
    n: usize,
) -> Result<Vec<u8>, &'static str> {
    // omega = syndrome * sigma mod x^(2t)
    let mut omega = vec![0u8; syndrome.len()];
    for (i, o) in omega.iter_mut().enumerate() {
        for j in 0..=i.min(sigma.len() - 1) {
            *o ^= Gf256::mul(sigma[j], syndrome[i - j]);
        }
    }

    // sigma'(x): odd-degree terms shifted down one
    let sigma_prime: Vec<u8> = sigma
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
        .collect();

    error_positions
        .iter()
        .map(|&pos| {
            let x_inv = inverse_locator(n, pos);
            let denominator = eval(&sigma_prime, x_inv);
            if denominator == 0 {
                return Err("sigma derivative is zero");
            }
            let x_k = Gf256::exp((n - 1 - pos) % 255);
            Ok(Gf256::mul(x_k, Gf256::div(eval(&omega, x_inv), denominator)))
        })
        .collect()
}
