#[cfg(test)]
mod utils;

#[cfg(test)]
mod access;
#[cfg(test)]
mod navigation;
