//! # Surface Sets
//!
//! Translates a whole surface map and aggregates the world radius.
//!
//! Entries are independent, so large maps are translated on the `rayon`
//! pool. Output keeps input order either way, and when several entries fail
//! the first one in input order is reported.

use pipeline_types::SurfaceKind;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::CadError;
use crate::frame::CadSurfaceDescriptor;
use crate::translator::CadTranslator;

/// One surface to translate, tagged with a caller-chosen key.
#[derive(Debug, Clone)]
pub struct SurfaceInput<'a, K> {
    pub key: K,
    pub kind: SurfaceKind,
    pub params: &'a [f64],
}

/// Translated surfaces in input order.
#[derive(Debug, Clone, Serialize)]
pub struct CadSurfaceSet<K> {
    pub surfaces: Vec<(K, CadSurfaceDescriptor)>,
    /// Largest radius contribution; `0.0` for an empty set.
    pub world_radius: f64,
}

/// Failure of one entry of a surface set.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSetError<K> {
    pub key: K,
    pub error: CadError,
}

/// Translate every input.
///
/// ## Parameters
///
/// - `translator`: family derivations and offset
/// - `inputs`: surfaces in document order
/// - `parallel`: translate on the `rayon` pool
///
/// ## Example
///
/// ```rust
/// use mcnp_cad::{translate_surfaces, CadTranslator, SurfaceInput};
/// use pipeline_types::SurfaceKind;
///
/// let inputs = [
///     SurfaceInput { key: 1, kind: SurfaceKind::So, params: &[2.0][..] },
///     SurfaceInput { key: 2, kind: SurfaceKind::Pz, params: &[5.0][..] },
/// ];
/// let set = translate_surfaces(&CadTranslator::default(), &inputs, false).unwrap();
/// assert_eq!(set.world_radius, 6.0);
/// assert_eq!(set.surfaces[0].0, 1);
/// ```
pub fn translate_surfaces<K>(
    translator: &CadTranslator,
    inputs: &[SurfaceInput<'_, K>],
    parallel: bool,
) -> Result<CadSurfaceSet<K>, SurfaceSetError<K>>
where
    K: Clone + Send + Sync,
{
    let translate = |input: &SurfaceInput<'_, K>| translator.translate(input.kind, input.params);
    let results: Vec<_> = if parallel {
        inputs.par_iter().map(translate).collect()
    } else {
        inputs.iter().map(translate).collect()
    };

    let mut surfaces = Vec::with_capacity(inputs.len());
    let mut world_radius = 0.0_f64;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(descriptor) => {
                world_radius = world_radius.max(descriptor.radius_contribution);
                surfaces.push((input.key.clone(), descriptor));
            }
            Err(error) => {
                return Err(SurfaceSetError {
                    key: input.key.clone(),
                    error,
                })
            }
        }
    }

    debug!(surfaces = surfaces.len(), world_radius, parallel, "translated surface set");
    Ok(CadSurfaceSet {
        surfaces,
        world_radius,
    })
}

// =============================================================================
// TESTS
// =============================================================================
