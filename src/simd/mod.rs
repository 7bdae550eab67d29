//! Hand-written intrinsic kernels.
//!
//! Only the instruction set detected by the build script is compiled:
//! `cfg(avx2)` on x86 hosts with AVX2 and FMA, `cfg(neon)` on aarch64,
//! `cfg(fallback)` otherwise, in which case no intrinsic strategy exists.

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

pub mod traits;

/// Name of the intrinsic strategy compiled into this build.
#[cfg(avx2)]
pub const ISA_NAME: &str = "AVX";
#[cfg(neon)]
pub const ISA_NAME: &str = "NEON";
#[cfg(not(any(avx2, neon)))]
pub const ISA_NAME: &str = "intrinsics";

/// Banner description of the intrinsic strategy.
#[cfg(avx2)]
pub const ISA_DESCRIPTION: &str = "AVX2+FMA intrinsics complex multiplication";
#[cfg(neon)]
pub const ISA_DESCRIPTION: &str = "NEON intrinsics complex multiplication";
#[cfg(not(any(avx2, neon)))]
pub const ISA_DESCRIPTION: &str = "not available on this build";

/// Intrinsic vector type of this build.
#[cfg(avx2)]
pub type IntrinsicVec = avx2::f32x8::F32x8;
#[cfg(neon)]
pub type IntrinsicVec = neon::f32x4x2::F32x4x2;

/// Whether the running CPU can execute the compiled intrinsic kernels.
///
/// The build script only looks at the build host, so x86 additionally checks
/// the CPU the binary actually runs on.
pub fn intrinsics_available() -> bool {
    #[cfg(avx2)]
    {
        std::is_x86_feature_detected!("avx2") && std::is_x86_feature_detected!("fma")
    }
    #[cfg(neon)]
    {
        true
    }
    #[cfg(not(any(avx2, neon)))]
    {
        false
    }
}
