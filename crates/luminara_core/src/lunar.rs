//! Truncated lunar theory.
//!
//! Principal periodic terms of the ELP-2000/82 series as tabulated by
//! Meeus (Astronomical Algorithms, ch. 47), truncated to the terms above
//! roughly 0.002°. Result is the geometric geocentric position referred to
//! the mean ecliptic and equinox of date, good to about 0.01° in
//! longitude.

/// Mean Earth–Moon distance in km used as the series origin.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Longitude and distance terms: `[D, M, M', F]`, Σl in 1e-6°, Σr in 1e-3 km.
#[rustfmt::skip]
static LON_DIST_TERMS: [([i8; 4], i32, i32); 34] = [
    ([0,  0,  1,  0],  6_288_774, -20_905_355),
    ([2,  0, -1,  0],  1_274_027,  -3_699_111),
    ([2,  0,  0,  0],    658_314,  -2_955_968),
    ([0,  0,  2,  0],    213_618,    -569_925),
    ([0,  1,  0,  0],   -185_116,      48_888),
    ([0,  0,  0,  2],   -114_332,      -3_149),
    ([2,  0, -2,  0],     58_793,     246_158),
    ([2, -1, -1,  0],     57_066,    -152_138),
    ([2,  0,  1,  0],     53_322,    -170_733),
    ([2, -1,  0,  0],     45_758,    -204_586),
    ([0,  1, -1,  0],    -40_923,    -129_620),
    ([1,  0,  0,  0],    -34_720,     108_743),
    ([0,  1,  1,  0],    -30_383,     104_755),
    ([2,  0,  0, -2],     15_327,      10_321),
    ([0,  0,  1,  2],    -12_528,           0),
    ([0,  0,  1, -2],     10_980,      79_661),
    ([4,  0, -1,  0],     10_675,     -34_782),
    ([0,  0,  3,  0],     10_034,     -23_210),
    ([4,  0, -2,  0],      8_548,     -21_636),
    ([2,  1, -1,  0],     -7_888,      24_208),
    ([2,  1,  0,  0],     -6_766,      30_824),
    ([1,  0, -1,  0],     -5_163,      -8_379),
    ([1,  1,  0,  0],      4_987,     -16_675),
    ([2, -1,  1,  0],      4_036,     -12_831),
    ([2,  0,  2,  0],      3_994,     -10_445),
    ([4,  0,  0,  0],      3_861,     -11_650),
    ([2,  0, -3,  0],      3_665,      14_403),
    ([0,  1, -2,  0],     -2_689,      -7_003),
    ([2,  0, -1,  2],     -2_602,           0),
    ([2, -1, -2,  0],      2_390,      10_056),
    ([1,  0,  1,  0],     -2_348,       6_322),
    ([2, -2,  0,  0],      2_236,      -9_884),
    ([0,  1,  2,  0],     -2_120,       5_751),
    ([0,  2,  0,  0],     -2_069,           0),
];

/// Latitude terms: `[D, M, M', F]`, Σb in 1e-6°.
#[rustfmt::skip]
static LAT_TERMS: [([i8; 4], i32); 28] = [
    ([0,  0,  0,  1], 5_128_122),
    ([0,  0,  1,  1],   280_602),
    ([0,  0,  1, -1],   277_693),
    ([2,  0,  0, -1],   173_237),
    ([2,  0, -1,  1],    55_413),
    ([2,  0, -1, -1],    46_271),
    ([2,  0,  0,  1],    32_573),
    ([0,  0,  2,  1],    17_198),
    ([2,  0,  1, -1],     9_266),
    ([0,  0,  2, -1],     8_822),
    ([2, -1,  0, -1],     8_216),
    ([2,  0, -2, -1],     4_324),
    ([2,  0,  1,  1],     4_200),
    ([2,  1,  0, -1],    -3_359),
    ([2, -1, -1,  1],     2_463),
    ([2, -1,  0,  1],     2_211),
    ([2, -1, -1, -1],     2_065),
    ([0,  1, -1, -1],    -1_870),
    ([4,  0, -1, -1],     1_828),
    ([0,  1,  0,  1],    -1_794),
    ([0,  0,  0,  3],    -1_749),
    ([0,  1, -1,  1],    -1_565),
    ([1,  0,  0,  1],    -1_491),
    ([0,  1,  1,  1],    -1_475),
    ([0,  1,  1, -1],    -1_410),
    ([0,  1,  0, -1],    -1_344),
    ([1,  0,  0, -1],    -1_335),
    ([0,  0,  3,  1],     1_107),
];

/// Geocentric Moon position: longitude and latitude in degrees (mean
/// equinox of date), distance in km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub distance_km: f64,
}

/// Moon position at `t` Julian centuries of TT since J2000.0.
pub fn moon_position(t: f64) -> LunarPosition {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l_mean = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let elong = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let sun_anom = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anom = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let arg_lat = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    // Eccentricity of Earth's orbit scales every term containing M.
    let ecc = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;

    let fundamentals = [elong, sun_anom, moon_anom, arg_lat];
    let term = |mult: &[i8; 4]| -> (f64, f64) {
        let arg: f64 = mult
            .iter()
            .zip(fundamentals.iter())
            .map(|(&n, &x)| n as f64 * x)
            .sum();
        let scale = ecc.powi(mult[1].unsigned_abs() as i32);
        (arg.to_radians(), scale)
    };

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for (mult, l, r) in &LON_DIST_TERMS {
        let (arg, scale) = term(mult);
        sum_l += *l as f64 * scale * arg.sin();
        sum_r += *r as f64 * scale * arg.cos();
    }
    let mut sum_b: f64 = LAT_TERMS
        .iter()
        .map(|(mult, b)| {
            let (arg, scale) = term(mult);
            *b as f64 * scale * arg.sin()
        })
        .sum();

    let sin_deg = |x: f64| x.to_radians().sin();
    sum_l += 3958.0 * sin_deg(a1) + 1962.0 * sin_deg(l_mean - arg_lat) + 318.0 * sin_deg(a2);
    sum_b += -2235.0 * sin_deg(l_mean)
        + 382.0 * sin_deg(a3)
        + 175.0 * sin_deg(a1 - arg_lat)
        + 175.0 * sin_deg(a1 + arg_lat)
        + 127.0 * sin_deg(l_mean - moon_anom)
        - 115.0 * sin_deg(l_mean + moon_anom);

    LunarPosition {
        lon_deg: (l_mean + sum_l / 1e6).rem_euclid(360.0),
        lat_deg: sum_b / 1e6,
        distance_km: MEAN_DISTANCE_KM + sum_r / 1000.0,
    }
}
