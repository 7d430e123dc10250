//! The state boundary overlay layer.

use super::{
    Context, DatasetChannel, IdentityCache, LayerGroup, LoadState, ParamRecord, SysParam,
    ZoneLayerOptions, ZoneShape,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Overlay layer that draws one boundary shape per dataset feature.
///
/// The dataset is fetched once, in the background, when the layer is
/// created. Each [`ZoneLayer::update`] call redraws the whole layer from the
/// dataset if it has arrived; before that, updates draw nothing.
///
/// A failed load leaves the layer blank for its whole lifetime. The failure
/// is visible through [`ZoneLayer::load_state`].
pub struct ZoneLayer {
    group: LayerGroup,
    context: Option<Rc<Context>>,
    cache: IdentityCache<SysParam, ParamRecord>,
    states: LoadState,
    loader: DatasetChannel,
}

impl ZoneLayer {
    /// Creates the layer and starts loading its dataset.
    pub fn new(options: ZoneLayerOptions) -> Self {
        let loader = DatasetChannel::load(&options.resource_path, &options.static_root);
        Self::with_loader(options, loader)
    }

    /// Creates the layer around a loader the caller controls.
    pub fn with_loader(options: ZoneLayerOptions, loader: DatasetChannel) -> Self {
        Self {
            group: LayerGroup::new(options),
            context: None,
            cache: IdentityCache::new(),
            states: LoadState::Loading,
            loader,
        }
    }

    /// Takes a finished load result, if one has arrived.
    fn poll_load(&mut self) {
        if self.states.is_terminal() {
            return;
        }

        match self.loader.try_recv() {
            Some(Ok(dataset)) => {
                log::info!("Loaded zone dataset: {} features", dataset.len());
                self.states = LoadState::Loaded(dataset);
            }
            Some(Err(e)) => {
                log::error!("Failed to load zone dataset: {}", e);
                self.states = LoadState::LoadFailed(e);
            }
            None => {}
        }
    }

    /// Redraws the layer for a new application context.
    ///
    /// `None` is ignored entirely. A context without system parameters is
    /// remembered but draws nothing.
    pub fn update(&mut self, context: Option<Rc<Context>>) {
        let Some(context) = context else {
            return;
        };
        self.context = Some(context.clone());

        let Some(sys_param) = context.sys_param.as_ref() else {
            return;
        };

        self.cache.get_or_insert_with(sys_param, || {
            log::debug!("New parameter record");
            ParamRecord::default()
        });

        self.poll_load();
        if let LoadState::Loaded(dataset) = &self.states {
            self.group.clear_shapes();

            let options = self.group.options().clone();
            for feature in dataset.features() {
                self.group.add_shape(ZoneShape::from_feature(feature, &options));
            }
            log::debug!("Redrew {} zone shapes", self.group.len());
        }
    }

    pub fn load_state(&mut self) -> &LoadState {
        self.poll_load();
        &self.states
    }

    pub fn is_loaded(&mut self) -> bool {
        matches!(self.load_state(), LoadState::Loaded(_))
    }

    /// Last context passed to `update`.
    pub fn context(&self) -> Option<&Rc<Context>> {
        self.context.as_ref()
    }

    pub fn group(&self) -> &LayerGroup {
        &self.group
    }

    /// Mutable access for hosts adding their own shapes. Anything added
    /// here is cleared by the next redraw.
    pub fn group_mut(&mut self) -> &mut LayerGroup {
        &mut self.group
    }

    pub fn shapes(&self) -> &[ZoneShape] {
        self.group.shapes()
    }

    pub fn options(&self) -> &ZoneLayerOptions {
        self.group.options()
    }

    /// The record cached for this exact parameter instance.
    pub fn param_record(&self, sys_param: &Rc<SysParam>) -> Option<Rc<RefCell<ParamRecord>>> {
        self.cache.get(sys_param)
    }

    /// Number of live parameter records.
    pub fn cached_params(&self) -> usize {
        self.cache.len()
    }
}

/// Creates a zone layer; same as [`ZoneLayer::new`].
pub fn zone_layer(options: ZoneLayerOptions) -> ZoneLayer {
    ZoneLayer::new(options)
}
