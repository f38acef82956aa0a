//! Pure conversion functions: TOML config structs and CLI flags -> crate API
//! config types.

use anyhow::{Context, Result, bail};

use dwtviz_figure::RenderOptions;
use dwtviz_gp::{GpRegressor, Kernel, RbfComponent, SmoothConfig};
use dwtviz_heatmap::{Colormap, DecomposeConfig, DecompositionMode};

use crate::cli::{HeatmapArgs, SmoothArgs};
use crate::config::{RbfToml, RenderToml, SmoothToml};

/// Overlays the heatmap flags that were given on the command line.
pub fn apply_heatmap_args(render: &mut RenderToml, args: &HeatmapArgs) {
    if let Some(ref w) = args.wavelet {
        render.wavelet = w.clone();
    }
    if args.level.is_some() {
        render.level = args.level;
    }
    if let Some(approx) = args.approx_override() {
        render.approx = Some(approx);
    }
    if let Some(ref c) = args.cmap {
        render.cmap = c.clone();
    }
    if let Some(ref d) = args.decomposition {
        render.decomposition = d.clone();
    }
    if args.cbar_limit.is_some() {
        render.cbar_limit = args.cbar_limit;
    }
    render.xyplot |= args.xyplot;
    render.xticks &= !args.no_xticks;
    render.yticks &= !args.no_yticks;
    render.index &= !args.no_index;
}

/// Overlays the smoothing flags that were given on the command line.
pub fn apply_smooth_args(smooth: &mut SmoothToml, args: &SmoothArgs) {
    if args.length.is_some() {
        smooth.length = args.length;
    }
    if let Some(samples) = args.samples {
        smooth.samples = samples;
    }
    if let Some(seed) = args.seed {
        smooth.seed = seed;
    }
    smooth.truncate |= args.truncate;
    smooth.xseconds |= args.xseconds;
}

/// Builds [`RenderOptions`] from the TOML render configuration.
pub fn build_render_options(render: &RenderToml) -> Result<RenderOptions> {
    let wavelet = DecomposeConfig::from_wavelet_name(&render.wavelet)?.wavelet();
    let cmap = Colormap::from_name(&render.cmap)?;
    let decomposition = DecompositionMode::from_name(&render.decomposition)?;
    if let Some(limit) = render.cbar_limit.filter(|l| !l.is_finite() || *l < 0.0) {
        bail!("cbar_limit must be finite and non-negative, got {limit}");
    }
    Ok(RenderOptions::new()
        .with_wavelet(wavelet)
        .with_level(render.level)
        .with_approx(render.approx)
        .with_cmap(cmap)
        .with_decomposition(decomposition)
        .with_cbar_limit(render.cbar_limit)
        .with_xyplot(render.xyplot)
        .with_xticks(render.xticks)
        .with_yticks(render.yticks)
        .with_index(render.index))
}

/// Builds a [`Kernel`] from TOML kernel terms.
pub fn build_kernel(terms: &[RbfToml]) -> Result<Kernel> {
    if terms.is_empty() {
        bail!("kernel must have at least one component");
    }
    let components = terms
        .iter()
        .enumerate()
        .map(|(i, t)| {
            RbfComponent::new(
                t.constant,
                t.length_scale,
                (t.length_bounds[0], t.length_bounds[1]),
            )
            .with_context(|| format!("invalid kernel component {i}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Kernel::new(components))
}

/// Builds a [`SmoothConfig`] from the TOML smoothing configuration.
pub fn build_smooth_config(smooth: &SmoothToml) -> Result<SmoothConfig> {
    let kernel = match smooth.kernel {
        Some(ref terms) => build_kernel(terms)?,
        None => Kernel::default_multiscale(),
    };
    let regressor = GpRegressor::new(kernel)
        .with_alpha(smooth.alpha)
        .with_n_restarts(smooth.n_restarts)
        .with_seed(smooth.seed);
    let mut cfg = SmoothConfig::new()
        .with_length_opt(smooth.length)
        .with_samples(smooth.samples)
        .with_truncate(smooth.truncate)
        .with_regressor(regressor);
    if let Some(threads) = smooth.threads {
        cfg = cfg.with_threads(threads);
    }
    Ok(cfg)
}
