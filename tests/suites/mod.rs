mod general;
mod legacy;
mod raster;
