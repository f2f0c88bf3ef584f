use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::Error as _;
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::network::network::{check_len, Network};

impl Network {
    /// Writes the weight document to `path` as pretty-printed JSON.
    ///
    /// Fails with `NonFiniteState` if any stored value is NaN or infinite.
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.ensure_finite()?;
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| {
            if e.is_io() {
                NetworkError::Io(e.into())
            } else {
                NetworkError::Encode(e)
            }
        })?;
        writer.flush()?;
        debug!(path = %path.display(), "exported network weights");
        Ok(())
    }

    /// Reads a weight document written by `export_json`.
    ///
    /// The decoded matrices must agree with the decoded layer lengths. The
    /// returned network uses the default activation and divergence policy.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let network: Network = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                NetworkError::Io(e.into())
            } else {
                NetworkError::Decode(e)
            }
        })?;
        network.check_consistent()?;
        debug!(
            path = %path.display(),
            input = network.input_size(),
            hidden = network.hidden_size(),
            output = network.output_size(),
            "loaded network weights"
        );
        Ok(network)
    }

    /// Replaces this network's persisted state with the document at `path`.
    ///
    /// The document's N, H and M must match this network's. On any failure
    /// the live network is left as it was. Runtime options are kept.
    pub fn import_json<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let loaded = Network::load_json(path)?;
        check_len("imported input_layer", self.input_size(), loaded.input_size())?;
        check_len("imported hidden_layer", self.hidden_size(), loaded.hidden_size())?;
        check_len("imported output_layer", self.output_size(), loaded.output_size())?;

        let Network {
            input_layer,
            hidden_layer,
            output_layer,
            weights_ih,
            weights_ho,
            learning_rate,
            ..
        } = loaded;
        self.input_layer = input_layer;
        self.hidden_layer = hidden_layer;
        self.output_layer = output_layer;
        self.weights_ih = weights_ih;
        self.weights_ho = weights_ho;
        self.learning_rate = learning_rate;
        Ok(())
    }

    /// `import_json` when `path` exists. Returns `Ok(false)` without touching
    /// the network if there is no file, and `Ok(true)` once imported.
    ///
    /// A file that exists but cannot be imported is an error, so callers that
    /// export back to `path` afterwards never replace weights they failed to read.
    pub fn import_if_present<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let path = path.as_ref();
        if !path.try_exists()? {
            debug!(path = %path.display(), "no weight document to import");
            return Ok(false);
        }
        self.import_json(path)?;
        Ok(true)
    }

    fn check_consistent(&self) -> Result<()> {
        for (name, layer) in [
            ("input_layer", &self.input_layer),
            ("hidden_layer", &self.hidden_layer),
            ("output_layer", &self.output_layer),
        ] {
            if layer.is_empty() {
                return Err(NetworkError::Decode(serde_json::Error::custom(format!(
                    "`{name}` must not be empty"
                ))));
            }
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(NetworkError::Decode(serde_json::Error::custom(format!(
                "`learning_rate` must be positive, got {}",
                self.learning_rate
            ))));
        }
        check_len("weights_ih rows", self.input_size(), self.weights_ih.rows)?;
        check_len("weights_ih columns", self.hidden_size(), self.weights_ih.cols)?;
        check_len("weights_ho rows", self.hidden_size(), self.weights_ho.rows)?;
        check_len("weights_ho columns", self.output_size(), self.weights_ho.cols)?;
        Ok(())
    }

    fn ensure_finite(&self) -> Result<()> {
        for (field, layer) in [
            ("input_layer", &self.input_layer),
            ("hidden_layer", &self.hidden_layer),
            ("output_layer", &self.output_layer),
        ] {
            if layer.iter().any(|x| !x.is_finite()) {
                return Err(NetworkError::NonFiniteState { field });
            }
        }
        if !self.weights_ih.is_finite() {
            return Err(NetworkError::NonFiniteState { field: "weights_ih" });
        }
        if !self.weights_ho.is_finite() {
            return Err(NetworkError::NonFiniteState { field: "weights_ho" });
        }
        if !self.learning_rate.is_finite() {
            return Err(NetworkError::NonFiniteState { field: "learning_rate" });
        }
        Ok(())
    }
}
